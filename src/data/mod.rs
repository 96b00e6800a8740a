pub mod api;
pub mod favoritos;
pub mod mis_reservas;
pub mod models;
pub mod perfil;
pub mod productos;
pub mod reserva;
pub mod reservas_admin;
pub mod session;
