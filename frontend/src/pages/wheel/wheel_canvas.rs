use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use shared::constants::{SECTOR_DEGREES, WHEEL_SECTORS};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    /// Accumulated rotation in whole degrees, clockwise.
    pub rotation: u64,
    pub is_spinning: bool,
    pub duration_ms: u32,
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let displayed = use_state(|| props.rotation as f64);
    let frame: FrameSlot = use_mut_ref(|| None);

    // Ease from wherever the wheel is drawn now to the new target.
    {
        let displayed = displayed.clone();
        let frame = frame.clone();
        use_effect_with(
            (props.rotation, props.is_spinning, props.duration_ms),
            move |(rotation, is_spinning, duration_ms)| {
                let target = *rotation as f64;
                if *is_spinning {
                    let from = *displayed;
                    animate(frame.clone(), displayed, from, target, *duration_ms as f64, None);
                } else {
                    frame.borrow_mut().take();
                    displayed.set(target);
                }
                move || {
                    frame.borrow_mut().take();
                }
            },
        );
    }

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((*displayed, props.is_spinning), move |(angle, is_spinning)| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                if draw_wheel(&canvas, *angle, *is_spinning).is_none() {
                    log::warn!("Canvas 2d context unavailable");
                }
            }
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            width="320"
            height="320"
            class="mx-auto max-w-full"
        />
    }
}

fn animate(
    frame: FrameSlot,
    displayed: UseStateHandle<f64>,
    from: f64,
    to: f64,
    duration: f64,
    started_at: Option<f64>,
) {
    let slot = frame.clone();
    let handle = request_animation_frame(move |now| {
        let started_at = started_at.unwrap_or(now);
        let progress = if duration > 0.0 {
            ((now - started_at) / duration).min(1.0)
        } else {
            1.0
        };
        displayed.set(from + (to - from) * ease_out_cubic(progress));
        if progress < 1.0 {
            animate(slot, displayed, from, to, duration, Some(started_at));
        }
    });
    *frame.borrow_mut() = Some(handle);
}

const SECTOR_LABELS: [&str; 2] = ["QUIZ", "PAY"];
const SECTOR_COLORS: [&str; 2] = ["#8b5cf6", "#f97316"];

/// Draws six sectors, even ones quiz and odd ones payment, with sector 0
/// starting under the pointer when `angle` is a whole number of turns.
fn draw_wheel(canvas: &HtmlCanvasElement, angle: f64, is_spinning: bool) -> Option<()> {
    let context = canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = width.min(height) / 2.0 - 20.0;

    context.clear_rect(0.0, 0.0, width, height);

    let glow_intensity = if is_spinning { 0.25 } else { 0.15 };
    context.begin_path();
    context.set_fill_style_str(&format!("rgba(130, 100, 255, {})", glow_intensity));
    let _ = context.arc(center_x, center_y, radius + 15.0, 0.0, 2.0 * PI);
    context.fill();

    context.save();
    let _ = context.translate(center_x, center_y);
    let _ = context.rotate(angle.rem_euclid(360.0) * PI / 180.0);

    let sweep = SECTOR_DEGREES as f64 * PI / 180.0;
    for sector in 0..WHEEL_SECTORS as usize {
        // Canvas angles start at three o'clock; the pointer sits at twelve.
        let start = sector as f64 * sweep - PI / 2.0;
        let end = start + sweep;

        context.begin_path();
        context.set_fill_style_str(SECTOR_COLORS[sector % 2]);
        context.move_to(0.0, 0.0);
        let _ = context.arc(0.0, 0.0, radius, start, end);
        context.close_path();
        context.fill();

        context.begin_path();
        context.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
        context.set_line_width(2.5);
        context.move_to(0.0, 0.0);
        context.line_to(radius * start.cos(), radius * start.sin());
        context.stroke();

        context.save();
        let _ = context.rotate(start + sweep / 2.0);
        let _ = context.translate(radius * 0.62, 0.0);
        let _ = context.rotate(PI / 2.0);
        context.set_fill_style_str("#ffffff");
        context.set_font("bold 18px 'Segoe UI', Roboto, system-ui, sans-serif");
        context.set_text_align("center");
        context.set_text_baseline("middle");
        let _ = context.fill_text(SECTOR_LABELS[sector % 2], 0.0, 0.0);
        context.restore();
    }

    context.begin_path();
    context.set_fill_style_str("#2d3142");
    let _ = context.arc(0.0, 0.0, radius * 0.2, 0.0, 2.0 * PI);
    context.fill();
    context.restore();

    context.begin_path();
    context.set_stroke_style_str("rgba(180, 130, 255, 0.5)");
    context.set_line_width(4.0);
    let _ = context.arc(center_x, center_y, radius - 2.0, 0.0, 2.0 * PI);
    context.stroke();

    // Pointer
    context.begin_path();
    context.set_fill_style_str("#facc15");
    context.move_to(center_x - 12.0, center_y - radius - 14.0);
    context.line_to(center_x + 12.0, center_y - radius - 14.0);
    context.line_to(center_x, center_y - radius + 12.0);
    context.close_path();
    context.fill();

    Some(())
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
