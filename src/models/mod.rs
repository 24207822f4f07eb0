pub mod account;

pub use account::{
    error_codes, Account, AccountListResponse, AccountStatusKind, BanRequest, ErrorBody,
    GameIdRequest, LoginRequest, LoginResponse, NewAccountInput, BAN_DAY_OPTIONS,
};
