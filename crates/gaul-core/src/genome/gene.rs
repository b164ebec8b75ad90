/// Opt-in validity check for a gene; most encodings are always valid, but
/// e.g. a permutation gene could reject a duplicate allele.
pub trait Valid {
    fn is_valid(&self) -> bool {
        true
    }
}

/// A single locus: the capability every concrete gene encoding (bit,
/// integer, real, printable-char, ...) must provide.
///
/// `new_instance` takes the PRNG explicitly rather than reaching for
/// thread-local or global randomness, so that a population's entire random
/// stream is reproducible from the one seed it was built with.
pub trait Gene: Clone + Valid {
    type Allele;

    fn allele(&self) -> &Self::Allele;
    fn new_instance(&self, rng: &mut crate::prng::Prng) -> Self;
    fn with_allele(&self, allele: &Self::Allele) -> Self;
}
