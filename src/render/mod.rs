pub(crate) mod compositor;
pub(crate) mod cpu;
pub(crate) mod fonts;
pub(crate) mod frame;
pub(crate) mod gradient;
pub(crate) mod layout;
pub(crate) mod stamp;
pub(crate) mod surface;
