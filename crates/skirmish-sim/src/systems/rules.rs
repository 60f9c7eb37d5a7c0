//! Pure rule evaluator (spec.md §4.3). Takes a `Program` and a sensor
//! table, returns a `ControlState`. No `hecs` import, same as
//! `deterrence-threat-ai::fsm` stays free of ECS types.

use skirmish_core::enums::{BoostDirection, CompareOp, ControlField, LogicalOp};
use skirmish_lang::{BinOp, Command, Condition, FnName, NumExpr, Program, UnaryOp};

use crate::systems::perception::SensorTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    pub throttle: f64,
    pub strafe: f64,
    pub turn: f64,
    pub fire: bool,
    pub boost: Option<BoostDirection>,
}

impl Default for ControlState {
    fn default() -> Self {
        ControlState {
            throttle: 0.0,
            strafe: 0.0,
            turn: 0.0,
            fire: false,
            boost: None,
        }
    }
}

/// Walk the rule list top to bottom; the last matching rule wins per
/// field. Returns the resulting control vector and the 1-based lines of
/// every rule whose condition matched, in order, for telemetry.
pub fn evaluate_program(program: &Program, sensors: &SensorTable) -> (ControlState, Vec<u32>) {
    let mut state = ControlState::default();
    let mut matched = Vec::new();
    for rule in &program.rules {
        let matches = match &rule.condition {
            None => true,
            Some(cond) => eval_condition(cond, sensors),
        };
        if !matches {
            continue;
        }
        matched.push(rule.line);
        match &rule.command {
            Command::SetControl { field, value } => match field {
                ControlField::Throttle => state.throttle = *value,
                ControlField::Strafe => state.strafe = *value,
                ControlField::Turn => state.turn = *value,
            },
            Command::Fire { enabled } => state.fire = *enabled,
            Command::Boost { direction } => state.boost = Some(*direction),
        }
    }
    (state, matched)
}

fn eval_condition(cond: &Condition, sensors: &SensorTable) -> bool {
    match cond {
        Condition::Visibility => sensors.enemy_visible(),
        Condition::Compare { left, op, right } => {
            match (eval_num(left, sensors), eval_num(right, sensors)) {
                (Some(l), Some(r)) => compare(l, *op, r),
                _ => false,
            }
        }
        Condition::Logical { op, left, right } => {
            let l = eval_condition(left, sensors);
            let r = eval_condition(right, sensors);
            match op {
                LogicalOp::And => l && r,
                LogicalOp::Or => l || r,
            }
        }
        Condition::Not(inner) => !eval_condition(inner, sensors),
    }
}

fn compare(l: f64, op: CompareOp, r: f64) -> bool {
    match op {
        CompareOp::Gt => l > r,
        CompareOp::Ge => l >= r,
        CompareOp::Lt => l < r,
        CompareOp::Le => l <= r,
        CompareOp::Eq => l == r,
        CompareOp::Ne => l != r,
    }
}

/// Evaluate a numeric expression. A `None` anywhere (unavailable sensor,
/// or a hazard such as divide-by-zero) propagates to `None` for the whole
/// expression rather than panicking.
fn eval_num(expr: &NumExpr, sensors: &SensorTable) -> Option<f64> {
    match expr {
        NumExpr::Number(v) => Some(*v),
        NumExpr::Sensor(name) => sensors.get(name),
        NumExpr::Unary(op, inner) => {
            let v = eval_num(inner, sensors)?;
            Some(match op {
                UnaryOp::Neg => -v,
                UnaryOp::Pos => v,
            })
        }
        NumExpr::Binary(op, left, right) => {
            let l = eval_num(left, sensors)?;
            let r = eval_num(right, sensors)?;
            let result = match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
            };
            result.is_finite().then_some(result)
        }
        NumExpr::Call(func, args) => {
            let values: Option<Vec<f64>> = args.iter().map(|a| eval_num(a, sensors)).collect();
            let values = values?;
            let result = match (func, values.as_slice()) {
                (FnName::Abs, [a]) => a.abs(),
                (FnName::Min, [a, b]) => a.min(*b),
                (FnName::Max, [a, b]) => a.max(*b),
                (FnName::Clamp, [v, lo, hi]) => v.clamp(*lo, *hi),
                (FnName::Atan2, [y, x]) => y.atan2(*x),
                (FnName::AngleDiff, [a, b]) => normalize_angle(a - b),
                (FnName::NormalizeAngle, [a]) => normalize_angle(*a),
                _ => unreachable!("parser guarantees arity matches FnName"),
            };
            result.is_finite().then_some(result)
        }
    }
}

/// Wrap a degree angle into `(-180, 180]`.
fn normalize_angle(degrees: f64) -> f64 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}
