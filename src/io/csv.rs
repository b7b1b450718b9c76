use std::io::{self, Write};

use crate::flight::TrajectoryPoint;

/// Write trajectory samples to CSV.
///
/// Columns: time, pos_x, pos_y, pos_z, vel_x, vel_y, vel_z, mach, aoa_deg
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[TrajectoryPoint]) -> io::Result<()> {
    writeln!(writer, "time,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z,mach,aoa_deg")?;

    for p in trajectory {
        writeln!(
            writer,
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.2}",
            p.t, p.x, p.y, p.z, p.vx, p.vy, p.vz, p.mach, p.aoa.to_degrees(),
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, trajectory: &[TrajectoryPoint]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_trajectory(&mut file, trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trajectory() -> Vec<TrajectoryPoint> {
        vec![
            TrajectoryPoint { t: 0.0, x: 0.0, y: 0.0, z: 0.0, vx: 0.0, vy: 0.0, vz: 0.0, mach: 0.0, aoa: 0.0 },
            TrajectoryPoint { t: 0.05, x: 0.0, y: 1.0, z: 0.0, vx: 0.0, vy: 50.0, vz: 0.0, mach: 0.15, aoa: 0.01 },
        ]
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let traj = sample_trajectory();
        let mut buf = Vec::new();
        write_trajectory(&mut buf, &traj).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("time,"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[1].starts_with("0.0000,"));
    }
}
