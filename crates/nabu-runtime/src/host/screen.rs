/// Snapshot of the primary display as reported by the host.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenInfo {
    pub width_px: u32,
    pub height_px: u32,
    pub scale_factor: f64,
    /// Physical panel dimensions in millimetres, when the backend reports
    /// them. Many windowing backends do not.
    pub physical_size_mm: Option<(u32, u32)>,
}

const MM_PER_INCH: f64 = 25.4;

impl ScreenInfo {
    /// Diagonal dots-per-inch of the display.
    ///
    /// Derived from the physical panel size and pixel resolution when both
    /// are known, otherwise `96 * scale_factor`.
    pub fn dpi(&self) -> f64 {
        match self.physical_size_mm {
            Some((width_mm, height_mm)) if width_mm > 0 && height_mm > 0 => {
                let diag_px = f64::from(self.width_px).hypot(f64::from(self.height_px));
                let diag_in =
                    (f64::from(width_mm) / MM_PER_INCH).hypot(f64::from(height_mm) / MM_PER_INCH);
                diag_px / diag_in
            }
            _ => 96.0 * self.scale_factor,
        }
    }
}
