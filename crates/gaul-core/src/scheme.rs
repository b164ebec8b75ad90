/// Whether and how local search (`adapt`) is applied to an entity: not at
/// all, Baldwinian (only the adapted fitness feeds back), or Lamarckian
/// (the adapted chromosomes replace the original).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AdaptPolicy {
    #[default]
    None,
    Baldwin,
    Lamarck,
}

/// A pair of independent adapt policies, one for parents and one for
/// children, replacing the source's integer bitfield with an explicit enum
/// pair so every combination is reachable and nameable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Scheme {
    pub parent_adapt: AdaptPolicy,
    pub child_adapt: AdaptPolicy,
}

impl Scheme {
    pub const DARWIN: Scheme = Scheme {
        parent_adapt: AdaptPolicy::None,
        child_adapt: AdaptPolicy::None,
    };

    pub fn new(parent_adapt: AdaptPolicy, child_adapt: AdaptPolicy) -> Self {
        Scheme {
            parent_adapt,
            child_adapt,
        }
    }

    pub fn is_darwin(&self) -> bool {
        *self == Self::DARWIN
    }

    pub fn requires_adapt(&self) -> bool {
        !self.is_darwin()
    }
}

/// Survival policy applied to parents at the end of a generation.
/// `rescore_parents` is orthogonal: when set, parents are re-evaluated
/// before any of these policies (and before the post-survival sort) is
/// applied, rather than being a fifth enum variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Elitism {
    ParentsDie,
    OneParentSurvives,
    ParentsSurvive,
}

impl Default for Elitism {
    fn default() -> Self {
        Elitism::ParentsSurvive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darwin_is_no_adapt() {
        assert!(Scheme::DARWIN.is_darwin());
        assert!(!Scheme::DARWIN.requires_adapt());
    }

    #[test]
    fn any_non_none_policy_requires_adapt() {
        let scheme = Scheme::new(AdaptPolicy::Baldwin, AdaptPolicy::None);
        assert!(scheme.requires_adapt());
    }
}
