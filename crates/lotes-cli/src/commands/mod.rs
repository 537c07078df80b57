pub mod area;
pub mod cpf;
pub mod dashboard;
pub mod dispatch;
pub mod logs;
pub mod parcel;
pub mod privacy;
pub mod schema;
pub mod shared;
pub mod user;
