use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use smogsense_core::map::{ring_points, MapView, ViewBounds};

use crate::ui::theme::{self, ACCENT, MUTED};

const GRATICULE_STEP: f64 = 0.1;
const PULSE_MIN_M: f64 = 250.0;
const PULSE_GROWTH_M: f64 = 900.0;

fn draw_ring(ctx: &mut Context<'_>, points: &[(f64, f64)], color: Color) {
    for pair in points.windows(2) {
        ctx.draw(&CanvasLine {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
            color,
        });
    }
}

fn draw_graticule(ctx: &mut Context<'_>, bounds: &ViewBounds) {
    let mut lon = (bounds.west / GRATICULE_STEP).ceil() * GRATICULE_STEP;
    while lon <= bounds.east {
        ctx.draw(&CanvasLine {
            x1: lon,
            y1: bounds.south,
            x2: lon,
            y2: bounds.north,
            color: Color::Rgb(40, 40, 40),
        });
        lon += GRATICULE_STEP;
    }
    let mut lat = (bounds.south / GRATICULE_STEP).ceil() * GRATICULE_STEP;
    while lat <= bounds.north {
        ctx.draw(&CanvasLine {
            x1: bounds.west,
            y1: lat,
            x2: bounds.east,
            y2: lat,
            color: Color::Rgb(40, 40, 40),
        });
        lat += GRATICULE_STEP;
    }
}

pub fn render_map(f: &mut Frame<'_>, area: Rect, map: &MapView) {
    let camera = map.camera();
    let block = Block::default()
        .title(format!(
            " Delhi  {:.4}, {:.4}  z{:.1} ",
            camera.center().lat,
            camera.center().lon,
            camera.zoom()
        ))
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let inner = block.inner(area);
    // Braille cells are twice as tall as they are wide.
    let aspect = f64::from(inner.width.max(1)) / (f64::from(inner.height.max(1)) * 2.0);
    let bounds = camera.bounds(aspect);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([bounds.west, bounds.east])
        .y_bounds([bounds.south, bounds.north])
        .paint(|ctx| {
            draw_graticule(ctx, &bounds);
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: MUTED,
            });
            ctx.layer();

            if let Some(circle) = map.circle() {
                let fill = theme::faded(circle.fill_color(), circle.fill_opacity());
                for fraction in [0.33, 0.66] {
                    draw_ring(ctx, &ring_points(circle.center(), circle.radius_m() * fraction), fill);
                }
                draw_ring(
                    ctx,
                    &ring_points(circle.center(), circle.radius_m()),
                    theme::color(circle.color()),
                );
            }

            if let Some(marker) = map.center_marker() {
                let phase = map.pulse_phase();
                let pulse = theme::faded(marker.color(), 1.0 - phase);
                draw_ring(
                    ctx,
                    &ring_points(marker.position(), PULSE_GROWTH_M.mul_add(phase, PULSE_MIN_M)),
                    pulse,
                );
                ctx.draw(&Points {
                    coords: &[(marker.position().lon, marker.position().lat)],
                    color: theme::color(marker.color()),
                });
            }
            ctx.layer();

            let open = map.open_popup_index();
            for (index, marker) in map.markers().iter().enumerate() {
                let position = marker.position();
                let style = Style::default().fg(theme::color(marker.color()));
                if open == Some(index) {
                    let name = marker.popup().lines().next().unwrap_or_default().to_string();
                    ctx.print(
                        position.lon,
                        position.lat,
                        Span::styled(format!("◉ {name}"), style.add_modifier(Modifier::BOLD)),
                    );
                } else {
                    ctx.print(position.lon, position.lat, Span::styled("●", style));
                }
            }
        });

    f.render_widget(canvas, area);
}
