//! Entity structs for all persisted domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `lotes-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON output and schema generation.

mod access_log;
mod area_audit;
mod construction;
mod parcel;
mod user;

pub use access_log::AccessLog;
pub use area_audit::AreaChangeAudit;
pub use construction::ConstructionRecord;
pub use parcel::{Parcel, format_iptu, sanitize_search_term};
pub use user::UserProfile;
