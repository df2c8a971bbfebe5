pub(crate) mod block;
pub(crate) mod composite;
pub(crate) mod cpu;
pub(crate) mod frame;
pub(crate) mod layout;
pub(crate) mod opening;
pub(crate) mod reveal;
