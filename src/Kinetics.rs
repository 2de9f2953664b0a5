/// rate laws: elementary (modified Arrhenius), three-body, falloff (Lindemann/Troe),
/// pressure-dependent (PLOG). Every rate law can report and reset its pre-exponential factor
/// ```
/// use IsoThe::Kinetics::kinetics::{ElementaryStruct, KineticModel, RateLaw};
/// let mut law: RateLaw = ElementaryStruct::new(1e13, 0.0, 1.0e5).into();
/// let k = law.K_const(1000.0, 101325.0, 0.0);
/// law.set_pre_exponential(5e12);
/// assert!((law.K_const(1000.0, 101325.0, 0.0) - 0.5 * k).abs() < 1e-9 * k);
/// ```
pub mod kinetics;
/// reactions as index lists into the species pool, the mechanism that owns the pool,
/// isomorphism of reactions and rate constants of the whole mechanism
pub mod reaction;
