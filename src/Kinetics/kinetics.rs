#![allow(non_snake_case)]
// Different types of rate laws proceeding here. Every rate law can report and reset its
// pre-exponential factor, which is what the isotopomer corrections work on.
use crate::Thermodynamics::R;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// modified Arrhenius form A*T^n*exp(-E/(R*T)), E in J/mol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrhenius {
    pub A: f64,
    pub n: f64,
    pub E: f64,
}

impl Arrhenius {
    pub fn new(A: f64, n: f64, E: f64) -> Self {
        Self { A, n, E }
    }
    pub fn K_const(&self, Temp: f64) -> f64 {
        self.A * Temp.powf(self.n) * f64::exp(-self.E / (Temp * R))
    }
}

#[enum_dispatch]
pub trait KineticModel {
    /// rate constant at temperature `Temp` (K), pressure `P` (Pa) and third-body
    /// concentration `M`
    fn K_const(&self, Temp: f64, P: f64, M: f64) -> f64;
    /// the single pre-exponential factor of the rate law, if it has one
    fn pre_exponential(&self) -> Option<f64>;
    /// Sets the pre-exponential factor. Returns false when the rate law has none.
    fn set_pre_exponential(&mut self, A: f64) -> bool;
    /// plain Arrhenius kinetics, the only kind halved for identical reactants
    fn is_arrhenius(&self) -> bool {
        false
    }
}
/////////////////////////ELEMENTARTY KINETICS///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementaryStruct {
    pub arrhenius: Arrhenius,
}

impl ElementaryStruct {
    pub fn new(A: f64, n: f64, E: f64) -> Self {
        Self {
            arrhenius: Arrhenius::new(A, n, E),
        }
    }
}

impl KineticModel for ElementaryStruct {
    fn K_const(&self, Temp: f64, _P: f64, _M: f64) -> f64 {
        self.arrhenius.K_const(Temp)
    }
    fn pre_exponential(&self) -> Option<f64> {
        Some(self.arrhenius.A)
    }
    fn set_pre_exponential(&mut self, A: f64) -> bool {
        self.arrhenius.A = A;
        true
    }
    fn is_arrhenius(&self) -> bool {
        true
    }
}
/////////////////////////////THREE-BODY KINETICS////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeBodyStruct {
    pub arrhenius: Arrhenius,
    /// collision efficiencies by species label
    #[serde(default)]
    pub eff: HashMap<String, f64>,
}

impl KineticModel for ThreeBodyStruct {
    fn K_const(&self, Temp: f64, _P: f64, M: f64) -> f64 {
        M * self.arrhenius.K_const(Temp)
    }
    fn pre_exponential(&self) -> Option<f64> {
        Some(self.arrhenius.A)
    }
    fn set_pre_exponential(&mut self, A: f64) -> bool {
        self.arrhenius.A = A;
        true
    }
}
/////////////////////////FALLOFF KINETICS///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FalloffStruct {
    pub low_rate: Arrhenius,
    pub high_rate: Arrhenius,
    /// Troe parameters: [alpha, T3, T1] or [alpha, T3, T1, T2]
    #[serde(default)]
    pub troe: Option<Vec<f64>>,
}

impl FalloffStruct {
    fn broadening(&self, Temp: f64, P_r: f64) -> f64 {
        let F_c = match self.troe.as_deref() {
            Some([A, T_3, T_1]) => (1.0 - A) * f64::exp(-Temp / T_3) + A * f64::exp(-Temp / T_1),
            Some([A, T_3, T_1, T_2]) => {
                (1.0 - A) * f64::exp(-Temp / T_3) + A * f64::exp(-Temp / T_1) + f64::exp(-T_2 / Temp)
            }
            _ => return 1.0,
        };
        let C = -0.4 - 0.67 * F_c.log10();
        let N = 0.75 - 1.27 * F_c.log10();
        let f_1 = (P_r.log10() + C) / (N - 0.14 * (P_r.log10() + C));
        10.0_f64.powf(F_c.log10() / (1.0 + f_1.powi(2)))
    }
}

impl KineticModel for FalloffStruct {
    fn K_const(&self, Temp: f64, _P: f64, M: f64) -> f64 {
        let K0 = self.low_rate.K_const(Temp);
        let K_inf = self.high_rate.K_const(Temp);
        let P_r = K0 * M / K_inf;
        K_inf * (P_r / (1.0 + P_r)) * self.broadening(Temp, P_r)
    }
    /// high-pressure limit A
    fn pre_exponential(&self) -> Option<f64> {
        Some(self.high_rate.A)
    }
    /// scales both limits so that the falloff shape is kept
    fn set_pre_exponential(&mut self, A: f64) -> bool {
        if self.high_rate.A == 0.0 {
            return false;
        }
        let factor = A / self.high_rate.A;
        self.high_rate.A = A;
        self.low_rate.A *= factor;
        true
    }
}
/////////////////////////PRESSURE DEPENDENT KINETICS///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureStruct {
    /// (pressure in Pa, Arrhenius) pairs sorted by pressure
    pub plog: Vec<(f64, Arrhenius)>,
}

impl KineticModel for PressureStruct {
    /// log-log interpolation between the bracketing pressures,
    /// clamped to the closest pressure outside the table
    fn K_const(&self, Temp: f64, P: f64, _M: f64) -> f64 {
        if self.plog.is_empty() {
            return 0.0;
        }
        let location = self.plog.iter().position(|(p, _)| *p >= P);
        match location {
            Some(0) => self.plog[0].1.K_const(Temp),
            None => self.plog[self.plog.len() - 1].1.K_const(Temp),
            Some(i) => {
                let (p_low, arr_low) = &self.plog[i - 1];
                let (p_high, arr_high) = &self.plog[i];
                let k_low = arr_low.K_const(Temp).ln();
                let k_high = arr_high.K_const(Temp).ln();
                let w = (P.ln() - p_low.ln()) / (p_high.ln() - p_low.ln());
                (k_low + w * (k_high - k_low)).exp()
            }
        }
    }
    fn pre_exponential(&self) -> Option<f64> {
        None
    }
    fn set_pre_exponential(&mut self, _A: f64) -> bool {
        false
    }
}

/// rate law of a reaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[enum_dispatch(KineticModel)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RateLaw {
    Elementary(ElementaryStruct),
    #[serde(rename = "three-body")]
    ThreeBody(ThreeBodyStruct),
    Falloff(FalloffStruct),
    #[serde(rename = "pres")]
    Pressure(PressureStruct),
}
