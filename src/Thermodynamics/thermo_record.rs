use crate::Thermodynamics::R;
use serde::{Deserialize, Serialize};

/// standard temperature of the tabulated data, K
pub const T_REF: f64 = 298.15;

fn Cp(t: f64, a: f64, b: f64, c: f64, d: f64, e: f64) -> f64 {
    R * (a + b * t + c * t.powi(2) + d * t.powi(3) + e * t.powi(4))
}
fn dh(t: f64, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> f64 {
    R * t
        * (a + b * t / 2.0
            + c * t.powi(2) / 3.0
            + d * t.powi(3) / 4.0
            + e * t.powi(4) / 5.0
            + f / t)
}
fn ds(t: f64, a: f64, b: f64, c: f64, d: f64, e: f64, g: f64) -> f64 {
    R * (a * t.ln() + b * t + c * t.powi(2) / 2.0 + d * t.powi(3) / 3.0 + e * t.powi(4) / 4.0 + g)
}

/// tabulated thermochemistry, SI units: J/mol, J/(mol*K)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermoData {
    pub h298: f64,
    pub s298: f64,
    /// (T, Cp) pairs
    #[serde(default)]
    pub cp_data: Vec<(f64, f64)>,
    #[serde(default)]
    pub cp0: Option<f64>,
    #[serde(default)]
    pub cp_inf: Option<f64>,
}

impl ThermoData {
    pub fn new(h298: f64, s298: f64) -> Self {
        Self {
            h298,
            s298,
            cp_data: Vec::new(),
            cp0: None,
            cp_inf: None,
        }
    }
}

/// one temperature range of a NASA 7-coefficient polynomial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasaPolynomial {
    pub t_min: f64,
    pub t_max: f64,
    pub coeffs: [f64; 7],
}

impl NasaPolynomial {
    pub fn contains(&self, t: f64) -> bool {
        t >= self.t_min && t <= self.t_max
    }
    pub fn cp(&self, t: f64) -> f64 {
        let [a, b, c, d, e, _, _] = self.coeffs;
        Cp(t, a, b, c, d, e)
    }
    pub fn h(&self, t: f64) -> f64 {
        let [a, b, c, d, e, f, _] = self.coeffs;
        dh(t, a, b, c, d, e, f)
    }
    pub fn s(&self, t: f64) -> f64 {
        let [a, b, c, d, e, _, g] = self.coeffs;
        ds(t, a, b, c, d, e, g)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasaThermo {
    pub polynomials: Vec<NasaPolynomial>,
    #[serde(default)]
    pub cp0: Option<f64>,
    #[serde(default)]
    pub cp_inf: Option<f64>,
}

impl NasaThermo {
    /// polynomial covering t, or the closest range when t is outside all of them
    fn polynomial_for(&self, t: f64) -> Option<&NasaPolynomial> {
        self.polynomials.iter().find(|p| p.contains(t)).or_else(|| {
            self.polynomials.iter().min_by(|p, q| {
                let dp = (p.t_min - t).abs().min((p.t_max - t).abs());
                let dq = (q.t_min - t).abs().min((q.t_max - t).abs());
                dp.total_cmp(&dq)
            })
        })
    }
    pub fn cp(&self, t: f64) -> Option<f64> {
        self.polynomial_for(t).map(|p| p.cp(t))
    }
    pub fn h(&self, t: f64) -> Option<f64> {
        self.polynomial_for(t).map(|p| p.h(t))
    }
    pub fn s(&self, t: f64) -> Option<f64> {
        self.polynomial_for(t).map(|p| p.s(t))
    }
}

/// Thermochemistry of a species: tabulated data or NASA polynomials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum ThermoRecord {
    Data(ThermoData),
    Nasa(NasaThermo),
}

impl ThermoRecord {
    /// standard entropy at 298.15 K, J/(mol*K)
    pub fn s298(&self) -> Option<f64> {
        match self {
            ThermoRecord::Data(data) => Some(data.s298),
            ThermoRecord::Nasa(nasa) => nasa.s(T_REF),
        }
    }

    pub fn h298(&self) -> Option<f64> {
        match self {
            ThermoRecord::Data(data) => Some(data.h298),
            ThermoRecord::Nasa(nasa) => nasa.h(T_REF),
        }
    }

    /// Shifts the entropy by `delta_s` and nothing else. For NASA polynomials the
    /// integration constant a7 of every range moves by delta_s/R, so S(T) shifts
    /// uniformly while Cp and H stay the same.
    pub fn add_entropy(&mut self, delta_s: f64) {
        match self {
            ThermoRecord::Data(data) => data.s298 += delta_s,
            ThermoRecord::Nasa(nasa) => {
                for polynomial in nasa.polynomials.iter_mut() {
                    polynomial.coeffs[6] += delta_s / R;
                }
            }
        }
    }

    pub fn set_cp_limits(&mut self, cp0: f64, cp_inf: f64) {
        match self {
            ThermoRecord::Data(data) => {
                data.cp0 = Some(cp0);
                data.cp_inf = Some(cp_inf);
            }
            ThermoRecord::Nasa(nasa) => {
                nasa.cp0 = Some(cp0);
                nasa.cp_inf = Some(cp_inf);
            }
        }
    }

    /// tabulated data at the given temperatures
    pub fn to_thermo_data(&self, temperatures: &[f64]) -> Option<ThermoData> {
        match self {
            ThermoRecord::Data(data) => Some(data.clone()),
            ThermoRecord::Nasa(nasa) => {
                let cp_data = temperatures
                    .iter()
                    .map(|&t| nasa.cp(t).map(|cp| (t, cp)))
                    .collect::<Option<Vec<(f64, f64)>>>()?;
                Some(ThermoData {
                    h298: nasa.h(T_REF)?,
                    s298: nasa.s(T_REF)?,
                    cp_data,
                    cp0: nasa.cp0,
                    cp_inf: nasa.cp_inf,
                })
            }
        }
    }
}
