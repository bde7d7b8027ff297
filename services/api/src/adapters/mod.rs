pub mod db;
pub mod generation_llm;
pub mod identity;
pub mod memory;
pub mod places;

pub use db::PgTripStore;
pub use generation_llm::OpenAiItineraryAdapter;
pub use identity::AnonymousIdentityAdapter;
pub use memory::InMemoryTripStore;
pub use places::GooglePlacesAdapter;
