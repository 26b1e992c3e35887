pub(crate) mod identity;
pub(crate) mod password;
pub(crate) mod policy;
pub(crate) mod token;
