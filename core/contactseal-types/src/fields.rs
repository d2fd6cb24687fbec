//! Well-known vCard field names, lower-case.

pub const VERSION: &str = "version";
pub const PRODID: &str = "prodid";
pub const UID: &str = "uid";
pub const FN: &str = "fn";
pub const N: &str = "n";
pub const EMAIL: &str = "email";
pub const TEL: &str = "tel";
pub const ADR: &str = "adr";
pub const KEY: &str = "key";
pub const GENDER: &str = "gender";
pub const CATEGORIES: &str = "categories";
pub const NICKNAME: &str = "nickname";
pub const NOTE: &str = "note";
pub const ORG: &str = "org";
