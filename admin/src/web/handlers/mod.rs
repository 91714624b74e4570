// vitrine/admin/src/web/handlers/mod.rs

pub mod catalog_handlers;
pub mod owner_handlers;
pub mod product_handlers;

#[cfg(test)]
pub(crate) mod test_support;
