//! 2×2 preview of the four context combinations, for eyeballing the layout.

use std::path::Path;

use plotters::prelude::*;

use crate::config::WhitesConfig;
use crate::core::naming::WhiteName;
use crate::error::{Result, StimError};
use crate::stim::whites::{Field, render_white, to_u8};

const TITLE_PX: u32 = 40;

/// Panels in row-major order: (left context, right context, title).
pub const PANELS: [(u8, u8, &str); 4] = [
    (0, 0, "black - black"),
    (0, 1, "black - white"),
    (1, 0, "white - black"),
    (1, 1, "white - white"),
];

/// Names shown in the preview; both targets at `lum`.
pub fn preview_names(lum: f64) -> [WhiteName; 4] {
    PANELS.map(|(cl, cr, _)| WhiteName {
        lum_left: lum,
        lum_right: lum,
        context_left: cl,
        context_right: cr,
    })
}

/// Largest uniform scale that fits `src` into `dst`.
pub fn fit_scale(src: (usize, usize), dst: (u32, u32)) -> f64 {
    if src.0 == 0 || src.1 == 0 {
        return 0.0;
    }
    let sx = dst.0 as f64 / src.0 as f64;
    let sy = dst.1 as f64 / src.1 as f64;
    sx.min(sy)
}

fn blit<DB: DrawingBackend>(area: &DrawingArea<DB, plotters::coord::Shift>, field: &Field) -> Result<()> {
    let (pw, ph) = area.dim_in_pixel();
    let scale = fit_scale((field.width, field.height), (pw, ph));
    if scale <= 0.0 {
        return Ok(());
    }
    let w = ((field.width as f64 * scale) as u32).min(pw);
    let h = ((field.height as f64 * scale) as u32).min(ph);
    for py in 0..h {
        let sy = ((py as f64 / scale) as usize).min(field.height - 1);
        for px in 0..w {
            let sx = ((px as f64 / scale) as usize).min(field.width - 1);
            let v = to_u8(field.get(sx, sy));
            area.draw_pixel((px as i32, py as i32), &RGBColor(v, v, v))
                .map_err(StimError::plot)?;
        }
    }
    Ok(())
}

fn preview_fields(cfg: &WhitesConfig) -> Vec<Field> {
    preview_names(cfg.background)
        .iter()
        .map(|name| render_white(cfg, name))
        .collect()
}

/// Lay `fields` out 2×2 in `PANELS` order, optionally captioned.
fn draw_panels<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    fields: &[Field],
    titled: bool,
) -> Result<()> {
    for (panel, (field, (_, _, title))) in root
        .split_evenly((2, 2))
        .iter()
        .zip(fields.iter().zip(PANELS))
    {
        if titled {
            let inner = panel
                .titled(title, ("sans-serif", 20))
                .map_err(StimError::plot)?;
            blit(&inner, field)?;
        } else {
            blit(panel, field)?;
        }
    }
    Ok(())
}

/// Render the four context combinations at mid-gray targets into one PNG.
pub fn render_context_preview(out_path: &Path, cfg: &WhitesConfig) -> Result<()> {
    let fields = preview_fields(cfg);
    let (fw, fh) = (fields[0].width as u32, fields[0].height as u32);

    let root = BitMapBackend::new(out_path, (fw * 2, (fh + TITLE_PX) * 2)).into_drawing_area();
    root.fill(&WHITE).map_err(StimError::plot)?;
    draw_panels(&root, &fields, true)?;
    root.present().map_err(StimError::plot)?;
    Ok(())
}
