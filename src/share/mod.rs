pub(crate) mod compose;
pub(crate) mod deliver;
pub(crate) mod encode;
pub(crate) mod layout;
