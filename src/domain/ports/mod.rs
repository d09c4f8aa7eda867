mod catalog_source_port;
mod transport_port;

pub use catalog_source_port::CatalogSource;
pub use transport_port::{OutgoingPhoto, OutgoingText, TextFormat, TransportPort};

#[cfg(test)]
pub mod mocks {
    pub use super::transport_port::mock::{RecordingTransport, TransportCall};
}
