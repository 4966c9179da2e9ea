pub mod owning_buffer;

pub use owning_buffer::OwningBuffer;
