mod device;
mod middle_admin;
mod password;
mod upload;
mod user;

pub use upload::FileUpload;
