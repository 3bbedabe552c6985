//! Content-type capability of a content model.
//!
//! A query is bound to a content model only to learn which content type it
//! filters on. Entry-like models name their content type; asset-like and
//! space-like models keep the default and the query carries no
//! `content_type` parameter.
//!
//! ```rust
//! use delivery_query::ContentModel;
//!
//! struct Cat;
//!
//! impl ContentModel for Cat {
//!     fn content_type_id() -> Option<&'static str> {
//!         Some("cat")
//!     }
//! }
//!
//! struct Asset;
//! impl ContentModel for Asset {}
//!
//! assert_eq!(Cat::content_type_id(), Some("cat"));
//! assert_eq!(Asset::content_type_id(), None);
//! ```

/// A caller-defined type describing the shape of delivered content.
pub trait ContentModel {
    /// The content type identifier, if this model has one.
    fn content_type_id() -> Option<&'static str> {
        None
    }
}
