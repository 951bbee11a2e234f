//! weight-gazer renders a weight/meal diary chart and composites it onto desktop wallpapers.
//!
//! # Pipeline overview
//!
//! 1. **Select**: partition a wallpaper directory into overlay and passthrough sets
//!    ([`select`]), seeded for reproducibility.
//! 2. **Fit**: find the largest centered frame of the target aspect ratio on each background
//!    ([`fit_frame`]) and the render scale for it ([`resolve_scale`]).
//! 3. **Render**: rasterize the chart at exactly the frame size ([`ChartRenderer`]).
//! 4. **Mask**: derive a soft backing plate from the chart's coverage ([`build_mask`]).
//! 5. **Composite**: paste mask then chart onto the background and write the result
//!    ([`composite`]).
//!
//! [`BatchRunner`] drives the whole run; per-wallpaper failures are reported, never fatal.
#![forbid(unsafe_code)]

mod assets;
mod batch;
mod chart;
mod display;
mod effects;
mod foundation;
mod geometry;

pub use assets::io::{
    enumerate_directory, has_image_extension, read_background, read_image, read_rgba,
    write_image,
};
pub use batch::config::OverlayConfig;
pub use batch::job::{JobContext, OverlayJob, overlay_file_name, plan_frame, run_overlay_job};
pub use batch::ledger::{TempArtifact, TempFileLedger, run_token_now};
pub use batch::runner::{BatchReport, BatchRunner, JobFailure};
pub use batch::select::{Partition, overlay_count, select, validate_frequency};
pub use chart::renderer::{ChartRenderer, SvgChartRenderer};
pub use chart::svg::{ChartStyle, chart_svg};
pub use chart::table::{DayEntry, WeightTable};
pub use display::environment::{DisplayEnvironment, StaticDisplay};
pub use display::xrandr::{XrandrDisplay, parse_current_screen};
pub use effects::blur::gaussian_blur_u8;
pub use effects::composite::{composite, composite_layers, paste_pixel, paste_with_alpha};
pub use effects::shadow::{build_mask, is_content};
pub use foundation::core::{ASPECT_TOLERANCE, AspectRatio, Dimensions, Frame, Shift};
pub use foundation::error::{GazerError, GazerResult};
pub use geometry::fit::{center_fixed_frame, fit_frame};
pub use geometry::scale::{blur_radius_for_scale, resolve_scale};
