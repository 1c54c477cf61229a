use thiserror::Error;

/// Degenerate numeric conditions the pilot detects and absorbs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PilotError {
    #[error("fall prediction infeasible (distance {distance:.3}, discriminant {discriminant:.3})")]
    PredictionInfeasible { distance: f64, discriminant: f64 },
    #[error("burn cannot reach target at orientation {orientation:.4} rad")]
    BurnUnreachable { orientation: f64 },
}
