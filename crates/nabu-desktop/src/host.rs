//! Desktop implementation of the runtime's host services.

use std::cell::RefCell;
use std::ffi::{c_char, c_void, CStr};
use std::ptr;
use std::rc::Rc;

use glutin::display::{Display, GlDisplay};
use winit::window::Window;

use nabu_runtime::host::{Host, ProcResolver, ScreenInfo};

thread_local! {
    // The resolver handed to scripted code is a plain C function pointer, so
    // the display it resolves against lives in a slot it can reach. The
    // driver and the runtime share the main thread.
    static GL_DISPLAY: RefCell<Option<Display>> = const { RefCell::new(None) };
}

/// Records the GL display used by the symbol resolver trampoline.
pub fn install_gl_display(display: Display) {
    GL_DISPLAY.with(|slot| *slot.borrow_mut() = Some(display));
}

unsafe extern "C" fn resolve_gl_symbol(name: *const c_char) -> *const c_void {
    if name.is_null() {
        return ptr::null();
    }
    let symbol = unsafe { CStr::from_ptr(name) };

    GL_DISPLAY.with(|slot| match slot.borrow().as_ref() {
        Some(display) => display.get_proc_address(symbol),
        None => ptr::null(),
    })
}

/// Host backed by the container's window.
pub struct DesktopHost {
    window: Rc<Window>,
}

impl DesktopHost {
    pub fn new(window: Rc<Window>) -> Self {
        Self { window }
    }
}

impl Host for DesktopHost {
    fn screen_info(&self) -> Option<ScreenInfo> {
        let monitor = self
            .window
            .current_monitor()
            .or_else(|| self.window.primary_monitor())?;
        let size = monitor.size();

        // winit does not report physical panel dimensions, so the dpi
        // derivation falls back to 96 * scale factor.
        Some(ScreenInfo {
            width_px: size.width,
            height_px: size.height,
            scale_factor: monitor.scale_factor(),
            physical_size_mm: None,
        })
    }

    fn proc_resolver(&self) -> Option<ProcResolver> {
        let installed = GL_DISPLAY.with(|slot| slot.borrow().is_some());
        installed.then(|| ProcResolver::new(resolve_gl_symbol))
    }
}
