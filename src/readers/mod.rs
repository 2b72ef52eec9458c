pub mod order_reader;

pub use order_reader::OrderReader;
