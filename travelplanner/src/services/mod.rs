//! Services module
//!
//! Business logic services that coordinate between commands, the
//! repository and the external integrations.

pub mod itinerary;
pub mod journal;
pub mod packing;
pub mod photos;
pub mod recommendations;
pub mod trips;
pub mod users;

pub use itinerary::ItineraryService;
pub use journal::JournalService;
pub use packing::PackingService;
pub use photos::PhotosService;
pub use recommendations::RecommendationsService;
pub use trips::TripsService;
pub use users::UsersService;
