mod area;
mod cpf;
mod logs;
mod parcel;
mod privacy;
mod user;

pub use area::AreaCommands;
pub use cpf::CpfCommands;
pub use logs::LogsCommands;
pub use parcel::ParcelCommands;
pub use privacy::PrivacyCommands;
pub use user::UserCommands;
