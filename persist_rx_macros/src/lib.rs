mod pure_object;

use proc_macro::TokenStream;

/// Derive macro for implementing `PureObject` (and `VersionedObject` when a
/// version field is marked).
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Debug, PartialEq, Serialize, Deserialize, PureObject)]
/// #[pure(entity = "Note")]
/// struct Note {
///     #[pure(primary_key)]
///     pub slug: String,
///     pub body: String,
///     #[pure(version)]
///     pub revision: u64,
/// }
/// ```
///
/// Defaults: the entity name is the struct name and the primary key is the
/// field named `id`. Attribute names are the Rust field names.
#[proc_macro_derive(PureObject, attributes(pure))]
pub fn derive_pure_object(input: TokenStream) -> TokenStream {
    pure_object::derive_pure_object(input)
}
