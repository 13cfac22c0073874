pub mod record_builder;
