use tower_engine::Rect;

/// Whether `candidate` lies completely inside `area`: every corner within
/// the area's edges, edges inclusive. A missing candidate is never inside.
pub fn is_completely_inside(candidate: Option<&Rect>, area: &Rect) -> bool {
    candidate.map_or(false, |rect| area.contains_rect(rect))
}
