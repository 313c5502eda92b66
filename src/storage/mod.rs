pub mod chamado;
pub mod scan;
pub mod seed;

pub use chamado::Chamado;
pub use scan::{LinearScan, SearchBackend, SearchError, SearchQuery, SearchResult};
pub use seed::{ChamadoStore, StoreError};
