use crate::particle::ParticleId;

/// An unordered link between two particles.
///
/// Endpoints are kept in the order the bond was first created so that
/// line-drawing collaborators see stable identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub a: ParticleId,
    pub b: ParticleId,
}

impl Bond {
    pub fn joins(&self, x: ParticleId, y: ParticleId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// Set of bonded pairs, at most one entry per pair regardless of orientation.
#[derive(Debug, Default, Clone)]
pub struct BondRegistry {
    bonds: Vec<Bond>,
}

impl BondRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    pub fn contains(&self, a: ParticleId, b: ParticleId) -> bool {
        self.bonds.iter().any(|bond| bond.joins(a, b))
    }

    /// Insert the pair unless it is a self-bond or already present in either order.
    ///
    /// Returns whether a bond was inserted.
    pub fn add(&mut self, a: ParticleId, b: ParticleId) -> bool {
        if a == b || self.contains(a, b) {
            return false;
        }
        self.bonds.push(Bond { a, b });
        true
    }

    /// Remove the pair in whichever orientation it was stored.
    pub fn remove(&mut self, a: ParticleId, b: ParticleId) -> bool {
        match self.bonds.iter().position(|bond| bond.joins(a, b)) {
            Some(idx) => {
                self.bonds.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove the bond if present, otherwise create it. Returns `true` when a bond now exists.
    pub fn toggle(&mut self, a: ParticleId, b: ParticleId) -> bool {
        if self.remove(a, b) {
            false
        } else {
            self.add(a, b)
        }
    }

    pub fn clear(&mut self) {
        self.bonds.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bond> {
        self.bonds.iter()
    }

    pub fn for_each(&self, mut f: impl FnMut(&Bond)) {
        for bond in &self.bonds {
            f(bond);
        }
    }
}
