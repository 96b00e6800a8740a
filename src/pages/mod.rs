pub mod administracion;
pub mod buscar_canchas;
pub mod detalle_cancha;
pub mod encabezado;
pub mod favoritos;
pub mod formulario_reserva;
pub mod inicio;
pub mod login;
pub mod mis_reservas;
pub mod pagar;
pub mod perfil;
pub mod registrar;
pub mod tarjeta_cancha;
