use nalgebra::Vector3;

pub type Vec3 = Vector3<f32>;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    #[default]
    Add,
    Subtract,
    Cross,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Subtract, Operation::Cross];

    pub fn apply(self, a: &Vec3, b: &Vec3) -> Vec3 {
        match self {
            Operation::Add => add(a, b),
            Operation::Subtract => subtract(a, b),
            Operation::Cross => cross(a, b),
        }
    }

    /// Expression shown on the operation buttons and next to the result arrow.
    pub fn expression(self) -> &'static str {
        match self {
            Operation::Add => "A + B",
            Operation::Subtract => "A − B",
            Operation::Cross => "A × B",
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn name(self) -> &'static str {
        ["X", "Y", "Z"][self.index()]
    }
}


pub fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    a + b
}


pub fn subtract(a: &Vec3, b: &Vec3) -> Vec3 {
    a - b
}


pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}


/// Euclidean norm, scaled by the largest component first so tiny components
/// don't underflow to zero and large ones don't overflow to infinity.
pub fn magnitude(v: &Vec3) -> f32 {
    let largest = v.amax();
    if largest == 0.0 {
        return 0.0;
    }
    (v / largest).norm() * largest
}


pub fn is_zero(v: &Vec3) -> bool {
    v.x == 0.0 && v.y == 0.0 && v.z == 0.0
}


/// `(x.xx, y.yy, z.zz)`
pub fn format(v: &Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}


/// Reads back what [`format`] writes. Surrounding whitespace and the
/// parentheses are optional; anything else that is not three numbers is `None`.
pub fn parse(s: &str) -> Option<Vec3> {
    let s = s.trim();
    let inner = s
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(s);

    let mut parts = inner.split(',').map(|p| p.trim().parse::<f32>());
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    let z = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Vec3::new(x, y, z))
}
