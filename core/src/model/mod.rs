// vitrine/src/model/mod.rs

//! The catalog's data model.

pub mod product;

pub use product::{parse_features, NewProduct, Product, ProductDraft, ProductPatch};
