pub(crate) mod agendamentos;
pub(crate) mod medicos;
pub(crate) mod pacientes;
pub(crate) mod users;
