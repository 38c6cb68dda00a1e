pub mod admin;
pub mod company;
pub mod driver;
pub mod login;
pub mod post_load;

pub use admin::AdminPage;
pub use company::CompanyPage;
pub use driver::DriverPage;
pub use login::LoginPage;
pub use post_load::PostLoadPage;
