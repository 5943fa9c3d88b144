use crate::overlay::geometry::WorkArea;
use eframe::egui;

/// Work area of the primary display in egui points, if it can be determined.
pub fn primary_work_area(ctx: &egui::Context) -> Option<WorkArea> {
    #[cfg(windows)]
    {
        if let Some(area) = system_work_area(ctx.pixels_per_point()) {
            return Some(area);
        }
    }

    let size = ctx.input(|i| i.viewport().monitor_size)?;
    work_area_from_monitor_size(size)
}

pub fn work_area_from_monitor_size(size: egui::Vec2) -> Option<WorkArea> {
    if !(size.x.is_finite() && size.y.is_finite()) || size.x < 1.0 || size.y < 1.0 {
        return None;
    }
    Some(WorkArea::new(size.x.floor() as u32, size.y.floor() as u32))
}

#[cfg(windows)]
fn system_work_area(pixels_per_point: f32) -> Option<WorkArea> {
    use windows::Win32::Foundation::RECT;
    use windows::Win32::UI::WindowsAndMessaging::{
        SystemParametersInfoW, SPI_GETWORKAREA, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
    };

    let mut rect = RECT::default();
    let ok = unsafe {
        SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            Some(&mut rect as *mut RECT as *mut _),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
    };
    if ok.is_err() {
        return None;
    }
    let scale = if pixels_per_point > 0.0 {
        pixels_per_point
    } else {
        1.0
    };
    let width = ((rect.right - rect.left) as f32 / scale).floor();
    let height = ((rect.bottom - rect.top) as f32 / scale).floor();
    if width < 1.0 || height < 1.0 {
        return None;
    }
    Some(WorkArea {
        x: (rect.left as f32 / scale).floor() as i32,
        y: (rect.top as f32 / scale).floor() as i32,
        width: width as u32,
        height: height as u32,
    })
}
