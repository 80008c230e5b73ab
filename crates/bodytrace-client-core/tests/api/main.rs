mod devices;
mod helpers;
mod login;
mod middle_admin;
mod passwords;
mod uploads;
mod users;
