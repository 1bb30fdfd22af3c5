//! Planned trajectory: four parallel, equally long sample sequences.

use csv::Writer;
use serde::{Deserialize, Serialize};

/// Sampled multi-axis trajectory.
///
/// `positions[k]`, `velocities[k]` and `accelerations[k]` hold one value per
/// DOF at `timestamps[k]`. Timestamps start at 0, never decrease and end at
/// the synchronized duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    positions: Vec<Vec<f64>>,
    velocities: Vec<Vec<f64>>,
    accelerations: Vec<Vec<f64>>,
    timestamps: Vec<f64>,
}

/// Borrowed view of one trajectory sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample<'a> {
    /// Sample time [s].
    pub time: f64,
    /// Joint positions.
    pub position: &'a [f64],
    /// Joint velocities.
    pub velocity: &'a [f64],
    /// Joint accelerations.
    pub acceleration: &'a [f64],
}

impl Trajectory {
    pub(crate) fn with_capacity(samples: usize) -> Self {
        Self {
            positions: Vec::with_capacity(samples),
            velocities: Vec::with_capacity(samples),
            accelerations: Vec::with_capacity(samples),
            timestamps: Vec::with_capacity(samples),
        }
    }

    pub(crate) fn push(
        &mut self,
        time: f64,
        position: Vec<f64>,
        velocity: Vec<f64>,
        acceleration: Vec<f64>,
    ) {
        self.timestamps.push(time);
        self.positions.push(position);
        self.velocities.push(velocity);
        self.accelerations.push(acceleration);
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// True if the trajectory holds no samples.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Degrees of freedom per sample (0 when empty).
    pub fn dof(&self) -> usize {
        self.positions.first().map_or(0, Vec::len)
    }

    /// Total duration: the last timestamp, or 0 when empty.
    pub fn duration(&self) -> f64 {
        self.timestamps.last().copied().unwrap_or(0.0)
    }

    /// Joint positions per sample.
    pub fn positions(&self) -> &[Vec<f64>] {
        &self.positions
    }

    /// Joint velocities per sample.
    pub fn velocities(&self) -> &[Vec<f64>] {
        &self.velocities
    }

    /// Joint accelerations per sample.
    pub fn accelerations(&self) -> &[Vec<f64>] {
        &self.accelerations
    }

    /// Sample times.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Sample `k`, if any.
    pub fn sample(&self, k: usize) -> Option<TrajectorySample<'_>> {
        Some(TrajectorySample {
            time: *self.timestamps.get(k)?,
            position: self.positions.get(k)?,
            velocity: self.velocities.get(k)?,
            acceleration: self.accelerations.get(k)?,
        })
    }

    /// Final sample, if any.
    pub fn last(&self) -> Option<TrajectorySample<'_>> {
        self.len().checked_sub(1).and_then(|k| self.sample(k))
    }

    /// Iterate over all samples in time order.
    pub fn iter(&self) -> impl Iterator<Item = TrajectorySample<'_>> + '_ {
        (0..self.len()).filter_map(move |k| self.sample(k))
    }

    /// Highest absolute velocity reached by `axis` over the whole trajectory.
    pub fn peak_speed(&self, axis: usize) -> f64 {
        self.velocities
            .iter()
            .filter_map(|v| v.get(axis))
            .fold(0.0, |m, v| m.max(v.abs()))
    }

    /// Render as CSV: `t,q_<name>..,v_<name>..,a_<name>..`.
    ///
    /// Columns are named after `joint_names` when it has one entry per DOF,
    /// otherwise by index.
    pub fn to_csv(&self, joint_names: &[String]) -> Result<String, csv::Error> {
        let dof = self.dof();
        let names: Vec<String> = if joint_names.len() == dof {
            joint_names.to_vec()
        } else {
            (0..dof).map(|i| i.to_string()).collect()
        };

        let mut wtr = Writer::from_writer(Vec::new());
        let header = std::iter::once("t".to_string()).chain(
            ["q", "v", "a"]
                .iter()
                .flat_map(|prefix| names.iter().map(move |name| format!("{prefix}_{name}"))),
        );
        wtr.write_record(header)?;

        for s in self.iter() {
            let row = std::iter::once(s.time)
                .chain(s.position.iter().copied())
                .chain(s.velocity.iter().copied())
                .chain(s.acceleration.iter().copied())
                .map(|v| v.to_string());
            wtr.write_record(row)?;
        }

        let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| {
            csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_samples() -> Trajectory {
        let mut t = Trajectory::with_capacity(2);
        t.push(0.0, vec![0.0, 1.0], vec![0.0, 0.0], vec![1.0, -1.0]);
        t.push(0.5, vec![0.25, 0.5], vec![-0.5, 0.0], vec![0.0, 0.0]);
        t
    }

    #[test]
    fn accessors() {
        let t = two_samples();
        assert_eq!(t.len(), 2);
        assert!(!t.is_empty());
        assert_eq!(t.dof(), 2);
        assert_eq!(t.duration(), 0.5);
        assert_eq!(t.sample(1).unwrap().position, &[0.25, 0.5]);
        assert!(t.sample(2).is_none());
        assert_eq!(t.last().unwrap().time, 0.5);
        assert_eq!(t.iter().count(), 2);
        assert_eq!(t.peak_speed(0), 0.5);
    }

    #[test]
    fn empty_trajectory() {
        let t = Trajectory::with_capacity(0);
        assert!(t.is_empty());
        assert_eq!(t.dof(), 0);
        assert_eq!(t.duration(), 0.0);
        assert!(t.last().is_none());
    }

    #[test]
    fn csv_with_names() {
        let t = two_samples();
        let csv = t.to_csv(&["s".to_string(), "e".to_string()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("t,q_s,q_e,v_s,v_e,a_s,a_e"));
        assert_eq!(lines.next(), Some("0,0,1,0,0,1,-1"));
        assert_eq!(lines.next(), Some("0.5,0.25,0.5,-0.5,0,0,0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn csv_falls_back_to_indices() {
        let csv = two_samples().to_csv(&[]).unwrap();
        assert!(csv.starts_with("t,q_0,q_1,v_0,v_1,a_0,a_1\n"));
    }

    #[test]
    fn csv_quotes_joint_names_with_commas() {
        let csv = two_samples()
            .to_csv(&["base,yaw".to_string(), "e".to_string()])
            .unwrap();
        assert!(csv.starts_with("t,\"q_base,yaw\",q_e,"));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn json_contains_all_sequences() {
        let json = two_samples().to_json().unwrap();
        let back: Trajectory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, two_samples());
        for key in ["positions", "velocities", "accelerations", "timestamps"] {
            assert!(json.contains(key));
        }
    }
}
