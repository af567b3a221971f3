use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::edwards::EdwardsPoint;
use crate::errors::CurveError;
use crate::montgomery::MontgomeryPoint;
use crate::weierstrass::WeierstrassPoint;

/// The three equivalent models of Curve25519.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveModel {
    Edwards,
    Montgomery,
    Weierstrass,
}

impl Display for CurveModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            CurveModel::Edwards => "Edwards",
            CurveModel::Montgomery => "Montgomery",
            CurveModel::Weierstrass => "Weierstrass",
        };
        f.write_str(name)
    }
}

/// A point tagged with the model it lives on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CurvePoint {
    Edwards(EdwardsPoint),
    Montgomery(MontgomeryPoint),
    Weierstrass(WeierstrassPoint),
}

impl CurvePoint {
    pub fn model(&self) -> CurveModel {
        match self {
            CurvePoint::Edwards(_) => CurveModel::Edwards,
            CurvePoint::Montgomery(_) => CurveModel::Montgomery,
            CurvePoint::Weierstrass(_) => CurveModel::Weierstrass,
        }
    }

    pub fn is_on_curve(&self) -> bool {
        match self {
            CurvePoint::Edwards(p) => p.is_on_curve(),
            CurvePoint::Montgomery(p) => p.is_on_curve(),
            CurvePoint::Weierstrass(p) => p.is_on_curve(),
        }
    }

    /// Moves the point onto the Weierstrass model used by the circuit.
    pub fn to_weierstrass(&self) -> Result<WeierstrassPoint, CurveError> {
        match self {
            CurvePoint::Edwards(p) => WeierstrassPoint::from_edwards(p),
            CurvePoint::Montgomery(p) => Ok(p.to_weierstrass()),
            CurvePoint::Weierstrass(p) => Ok(p.clone()),
        }
    }
}

impl From<EdwardsPoint> for CurvePoint {
    fn from(point: EdwardsPoint) -> Self {
        CurvePoint::Edwards(point)
    }
}

impl From<MontgomeryPoint> for CurvePoint {
    fn from(point: MontgomeryPoint) -> Self {
        CurvePoint::Montgomery(point)
    }
}

impl From<WeierstrassPoint> for CurvePoint {
    fn from(point: WeierstrassPoint) -> Self {
        CurvePoint::Weierstrass(point)
    }
}
