// Logging to the browser console. Off wasm there is no console to talk to,
// so these compile down to nothing and native tests stay quiet.

#[cfg(target_arch = "wasm32")]
use web_sys::console;

pub fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    console::log_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

pub fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    console::warn_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

// Times the enclosing scope with console.time / console.timeEnd.
// Only active with the `profile` feature.
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        #[cfg(all(target_arch = "wasm32", feature = "profile"))]
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        #[cfg(all(target_arch = "wasm32", feature = "profile"))]
        console::time_end_with_label(self.name);
        #[cfg(not(all(target_arch = "wasm32", feature = "profile")))]
        let _ = self.name;
    }
}
