pub(crate) mod agendamentos;
pub(crate) mod auth;
pub(crate) mod medicos;
pub(crate) mod pacientes;
pub(crate) mod root;
pub(crate) mod users;
