pub(crate) mod frame_loop;
pub(crate) mod instance;
pub(crate) mod live;
pub(crate) mod motion;
#[cfg(feature = "window")]
pub(crate) mod window;
