//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub const PANIC_ON_RARE_ERR: bool = true;

pub mod client {
    /// Used when no configuration is available (always the case on the web)
    pub const CLIENT_DEFAULT_SERVER_ADDRESS: &str = "http://localhost:8080";
    pub const CLIENT_DEFAULT_PAGE_SIZE: u32 = 10;
    /// Choices offered on screens that allow changing the page size
    pub const CLIENT_PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 20, 50];
    pub const CLIENT_DEFAULT_SORT_BY: &str = "createdAt";
    /// Key used for the session in browser local storage
    pub const CLIENT_SESSION_STORAGE_KEY: &str = "bodytrace_session";
}

pub mod download {
    pub const DOWNLOAD_DEFAULT_DEVICE_CSV: &str = "device_data.csv";
    pub const DOWNLOAD_DEFAULT_CREATED_USERS: &str = "created_users.xlsx";
    pub const DOWNLOAD_DEFAULT_RESET_PASSWORDS: &str = "reset_passwords.xlsx";
    pub const DOWNLOAD_DEFAULT_MIDDLE_ADMINS: &str = "created_middle_admins.xlsx";
    /// Name of the multipart field the backend reads uploaded spreadsheets from
    pub const DOWNLOAD_UPLOAD_FIELD_NAME: &str = "file";
    pub const DOWNLOAD_XLSX_MIME: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;
    pub const PATH_LOGIN: PathSpec = PathSpec::post("/api/admin/login", "login");
    pub const PATH_API_CHANGE_PASSWORD: PathSpec =
        PathSpec::post("/api/user/change-password", "change password");
    pub const PATH_API_DEVICE_DATA: PathSpec =
        PathSpec::post("/api/user/device/data", "fetch device data");
    pub const PATH_API_DEVICE_DOWNLOAD_CSV: PathSpec =
        PathSpec::post("/api/user/downloadCSV", "download CSV");
    pub const PATH_API_DEVICE_FILTERED_DATA: PathSpec =
        PathSpec::post("/api/user/filtered-data", "fetch filtered device data");
    pub const PATH_API_MIDDLE_ADMIN_DEVICE_DATA: PathSpec =
        PathSpec::post("/api/middle-admin/getdevicedata", "fetch client device data");
    pub const PATH_API_MIDDLE_ADMIN_USERS: PathSpec =
        PathSpec::get("/api/middle-admin/:id/users", "fetch clients");
    pub const PATH_API_MIDDLE_ADMINS_FROM_EXCEL: PathSpec = PathSpec::post(
        "/api/user/middle-admin/create-middle-admins",
        "create middle admins from excel",
    );
    pub const PATH_API_PASSWORD_RESET: PathSpec =
        PathSpec::post("/api/user/reset-password", "reset password");
    pub const PATH_API_PASSWORD_RESET_REQUEST: PathSpec =
        PathSpec::post("/api/user/request-password-reset", "request password reset");
    pub const PATH_API_PASSWORDS_FROM_EXCEL: PathSpec = PathSpec::post(
        "/api/user/reset-password-from-excel",
        "reset passwords from excel",
    );
    pub const PATH_API_USER: PathSpec = PathSpec::get("/api/user/:id/getuserbyid", "fetch user");
    pub const PATH_API_USER_CREATE: PathSpec = PathSpec::post("/api/user/create", "create user");
    pub const PATH_API_USER_EDIT: PathSpec = PathSpec::put("/api/user/users/:id", "edit user");
    pub const PATH_API_USERS_FROM_EXCEL: PathSpec = PathSpec::post(
        "/api/user/create-users-from-excel",
        "create users from excel",
    );
    pub const PATH_API_USERS_LIST: PathSpec = PathSpec::post("/api/user/list/user", "list users");
}
