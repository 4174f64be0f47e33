//! Primitive rasterization functions.
//!
//! One free function per shape-kind × fill-mode. Each function sets the
//! draw color once and then talks only to the [`Renderer`] collaborator; no
//! shape objects are involved, so these are directly usable for
//! immediate-mode drawing.
//!
//! Triangles are filled with a dual-edge integer scanline walk and circles
//! with the midpoint algorithm. Both are pure integer arithmetic: no
//! floating point, no allocation, no failure modes.

use std::mem;

use crate::color::Color;
use crate::geometry::Vec2;
use crate::render::Renderer;

/// Plot a single point.
pub fn draw_point<R: Renderer>(out: &mut R, pos: Vec2, color: Color) {
    out.set_draw_color(color);
    out.draw_point(pos.x, pos.y);
}

/// Draw a line segment. Endpoint order does not matter.
pub fn draw_line<R: Renderer>(out: &mut R, a: Vec2, b: Vec2, color: Color) {
    out.set_draw_color(color);
    out.draw_line(a.x, a.y, b.x, b.y);
}

/// Draw a triangle outline: three segments connecting the vertices in input
/// order, closing back to the first.
pub fn draw_triangle_outline<R: Renderer>(out: &mut R, v1: Vec2, v2: Vec2, v3: Vec2, color: Color) {
    out.set_draw_color(color);
    out.draw_line(v1.x, v1.y, v2.x, v2.y);
    out.draw_line(v2.x, v2.y, v3.x, v3.y);
    out.draw_line(v3.x, v3.y, v1.x, v1.y);
}

/// Fill a triangle with horizontal scanline spans.
///
/// The three vertices are sorted by ascending y (strict comparisons, so
/// equal-y vertices keep their input order), then two edge walkers advance
/// simultaneously from the top vertex: the long edge spans top-to-bottom,
/// the short edge top-to-middle and then middle-to-bottom. Each walker is a
/// Bresenham-style error accumulator that swaps the x/y roles when its edge
/// is steeper than 45°. One span is emitted per scanline covering the
/// min/max of the two walkers; a flat top skips straight to the lower half,
/// and the lower half is inclusive of the bottom vertex's row.
#[allow(clippy::too_many_lines)]
pub fn draw_triangle<R: Renderer>(out: &mut R, v1: Vec2, v2: Vec2, v3: Vec2, color: Color) {
    out.set_draw_color(color);

    let (mut x1, mut y1) = (v1.x, v1.y);
    let (mut x2, mut y2) = (v2.x, v2.y);
    let (mut x3, mut y3) = (v3.x, v3.y);

    if y1 > y2 {
        mem::swap(&mut y1, &mut y2);
        mem::swap(&mut x1, &mut x2);
    }
    if y1 > y3 {
        mem::swap(&mut y1, &mut y3);
        mem::swap(&mut x1, &mut x3);
    }
    if y2 > y3 {
        mem::swap(&mut y2, &mut y3);
        mem::swap(&mut x2, &mut x3);
    }

    // Two edge walkers: t1x on the short edge, t2x on the long edge.
    let mut t1x = x1;
    let mut t2x = x1;
    let mut y = y1;

    let mut dx1 = x2 - x1;
    let mut signx1 = 1;
    if dx1 < 0 {
        dx1 = -dx1;
        signx1 = -1;
    }
    let mut dy1 = y2 - y1;

    let mut dx2 = x3 - x1;
    let mut signx2 = 1;
    if dx2 < 0 {
        dx2 = -dx2;
        signx2 = -1;
    }
    let dy2 = y3 - y1;

    // A "changed" edge is steeper than 45°: the walker steps in y per
    // iteration and only occasionally in x.
    let mut changed1 = false;
    let mut changed2 = false;
    let mut dy1_w = dy1;
    let mut dx1_w = dx1;
    if dy1_w > dx1_w {
        mem::swap(&mut dx1_w, &mut dy1_w);
        changed1 = true;
    }
    let mut dy2_w = dy2;
    let mut dx2_w = dx2;
    if dy2_w > dx2_w {
        mem::swap(&mut dy2_w, &mut dx2_w);
        changed2 = true;
    }

    let mut e2 = dx2_w >> 1;

    // Flat top: the whole upper half collapses, start at the lower half.
    if y1 != y2 {
        let mut e1 = dx1_w >> 1;

        let mut i = 0;
        while i < dx1_w {
            let mut t1xp = 0;
            let mut t2xp = 0;
            let (mut minx, mut maxx) = if t1x < t2x { (t1x, t2x) } else { (t2x, t1x) };

            // Advance the short edge until its y is about to change.
            'edge1: {
                while i < dx1_w {
                    i += 1;
                    e1 += dy1_w;
                    while e1 >= dx1_w {
                        e1 -= dx1_w;
                        if changed1 {
                            t1xp = signx1;
                        } else {
                            break 'edge1;
                        }
                    }
                    if changed1 {
                        break;
                    }
                    t1x += signx1;
                }
            }
            // Advance the long edge until its y is about to change.
            'edge2: {
                loop {
                    e2 += dy2_w;
                    while e2 >= dx2_w {
                        e2 -= dx2_w;
                        if changed2 {
                            t2xp = signx2;
                        } else {
                            break 'edge2;
                        }
                    }
                    if changed2 {
                        break;
                    }
                    t2x += signx2;
                }
            }

            if minx > t1x {
                minx = t1x;
            }
            if minx > t2x {
                minx = t2x;
            }
            if maxx < t1x {
                maxx = t1x;
            }
            if maxx < t2x {
                maxx = t2x;
            }
            out.draw_line(minx, y, maxx, y);

            if !changed1 {
                t1x += signx1;
            }
            t1x += t1xp;
            if !changed2 {
                t2x += signx2;
            }
            t2x += t2xp;
            y += 1;
            if y == y2 {
                break;
            }
        }
    }

    // Lower half: rebuild the short-edge walker for the middle-to-bottom
    // edge; the long-edge walker keeps its accumulated state.
    dx1 = x3 - x2;
    signx1 = 1;
    if dx1 < 0 {
        dx1 = -dx1;
        signx1 = -1;
    }
    dy1 = y3 - y2;
    t1x = x2;

    changed1 = false;
    dy1_w = dy1;
    dx1_w = dx1;
    if dy1_w > dx1_w {
        mem::swap(&mut dy1_w, &mut dx1_w);
        changed1 = true;
    }

    let mut e1 = dx1_w >> 1;

    let mut i = 0;
    while i <= dx1_w {
        let mut t1xp = 0;
        let mut t2xp = 0;
        let (mut minx, mut maxx) = if t1x < t2x { (t1x, t2x) } else { (t2x, t1x) };

        'edge1: {
            while i < dx1_w {
                e1 += dy1_w;
                while e1 >= dx1_w {
                    e1 -= dx1_w;
                    if changed1 {
                        t1xp = signx1;
                        break;
                    }
                    break 'edge1;
                }
                if changed1 {
                    break;
                }
                t1x += signx1;
                if i < dx1_w {
                    i += 1;
                }
            }
        }
        'edge2: {
            while t2x != x3 {
                e2 += dy2_w;
                while e2 >= dx2_w {
                    e2 -= dx2_w;
                    if changed2 {
                        t2xp = signx2;
                    } else {
                        break 'edge2;
                    }
                }
                if changed2 {
                    break;
                }
                t2x += signx2;
            }
        }

        if minx > t1x {
            minx = t1x;
        }
        if minx > t2x {
            minx = t2x;
        }
        if maxx < t1x {
            maxx = t1x;
        }
        if maxx < t2x {
            maxx = t2x;
        }
        out.draw_line(minx, y, maxx, y);

        if !changed1 {
            t1x += signx1;
        }
        t1x += t1xp;
        if !changed2 {
            t2x += signx2;
        }
        t2x += t2xp;
        y += 1;
        if y > y3 {
            return;
        }
        i += 1;
    }
}

/// Fill an axis-aligned rectangle.
///
/// Delegates straight to the backend; negative dimensions are passed
/// through untouched (an inherited backend contract, not validated here).
pub fn draw_rect<R: Renderer>(out: &mut R, pos: Vec2, width: i32, height: i32, color: Color) {
    out.set_draw_color(color);
    out.fill_rect(pos.x, pos.y, width, height);
}

/// Draw an axis-aligned rectangle outline.
pub fn draw_rect_outline<R: Renderer>(
    out: &mut R,
    pos: Vec2,
    width: i32,
    height: i32,
    color: Color,
) {
    out.set_draw_color(color);
    out.draw_rect_outline(pos.x, pos.y, width, height);
}

/// Fill a circle with the midpoint algorithm.
///
/// Four horizontal spans per octant step (both role assignments, mirrored
/// about the center) cover the whole disc. A zero radius draws nothing at
/// all — not even a single pixel.
pub fn draw_circle<R: Renderer>(out: &mut R, center: Vec2, radius: i32, color: Color) {
    let xc = center.x;
    let yc = center.y;

    let mut x = 0;
    let mut y = radius;
    let mut p = 3 - 2 * radius;
    if radius == 0 {
        return;
    }

    out.set_draw_color(color);

    while y >= x {
        // Scanline spans instead of edge points fill the disc.
        out.draw_line(xc - x, yc - y, xc + x, yc - y);
        out.draw_line(xc - y, yc - x, xc + y, yc - x);
        out.draw_line(xc - x, yc + y, xc + x, yc + y);
        out.draw_line(xc - y, yc + x, xc + y, yc + x);
        if p < 0 {
            p += 4 * x + 6;
            x += 1;
        } else {
            p += 4 * (x - y) + 10;
            x += 1;
            y -= 1;
        }
    }
}

/// Draw a circle outline with the midpoint algorithm.
///
/// Walks one octant and plots the 8 reflected points per step. A zero
/// radius is a no-op.
pub fn draw_circle_outline<R: Renderer>(out: &mut R, center: Vec2, radius: i32, color: Color) {
    out.set_draw_color(color);

    let xc = center.x;
    let yc = center.y;

    let mut x = 0;
    let mut y = radius;
    let mut p = 3 - 2 * radius;
    if radius == 0 {
        return;
    }

    while y >= x {
        out.draw_point(xc - x, yc - y);
        out.draw_point(xc - y, yc - x);
        out.draw_point(xc + y, yc - x);
        out.draw_point(xc + x, yc - y);
        out.draw_point(xc - x, yc + y);
        out.draw_point(xc - y, yc + x);
        out.draw_point(xc + y, yc + x);
        out.draw_point(xc + x, yc + y);
        if p < 0 {
            p += 4 * x + 6;
            x += 1;
        } else {
            p += 4 * (x - y) + 10;
            x += 1;
            y -= 1;
        }
    }
}
