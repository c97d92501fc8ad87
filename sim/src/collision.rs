use glam::Vec3;

use crate::config::CourseConfig;
use crate::course::Course;

/// Result of testing the ship against every planet and ring for one frame.
///
/// Planets are scanned first in list order. The first planet the ship is
/// inside ends the scan: `crashed` is set and no rings are reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactReport {
    pub crashed: Option<usize>,
    /// Last planet (in list order) whose message range contains the ship.
    pub nearby_planet: Option<usize>,
    /// Uncollected rings the ship is passing through, in list order.
    pub rings: Vec<usize>,
}

pub fn scan(course: &Course, ship: Vec3, config: &CourseConfig) -> ContactReport {
    let mut report = ContactReport::default();

    for (i, planet) in course.planets.iter().enumerate() {
        let distance = ship.distance(planet.position);
        if distance < planet.radius + config.hull_margin {
            report.crashed = Some(i);
            return report;
        }
        if distance < config.message_range {
            report.nearby_planet = Some(i);
        }
    }

    for (i, ring) in course.rings.iter().enumerate() {
        if ring.is_collected() {
            continue;
        }
        let passage = ring.passage(ship);
        if passage.distance_to_plane < config.capture_depth
            && passage.distance_in_plane < config.capture_radius
        {
            report.rings.push(i);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Planet, Ring};

    fn planet(position: Vec3, radius: f32) -> Planet {
        Planet {
            position,
            radius,
            message: format!("planet at {position}"),
            color: 0,
        }
    }

    fn course(planets: Vec<Planet>, rings: Vec<Ring>) -> Course {
        Course { planets, rings }
    }

    #[test]
    fn inside_planet_crashes() {
        let c = course(vec![planet(Vec3::new(5.0, 0.0, 0.0), 10.0)], vec![]);
        let report = scan(&c, Vec3::ZERO, &CourseConfig::default());
        assert_eq!(report.crashed, Some(0));
    }

    #[test]
    fn hull_margin_extends_planet() {
        let c = course(vec![planet(Vec3::new(10.5, 0.0, 0.0), 10.0)], vec![]);
        let report = scan(&c, Vec3::ZERO, &CourseConfig::default());
        assert_eq!(report.crashed, Some(0));

        let c = course(vec![planet(Vec3::new(11.5, 0.0, 0.0), 10.0)], vec![]);
        let report = scan(&c, Vec3::ZERO, &CourseConfig::default());
        assert_eq!(report.crashed, None);
    }

    #[test]
    fn first_planet_in_list_order_wins() {
        let c = course(
            vec![
                planet(Vec3::new(50.0, 0.0, 0.0), 5.0),
                planet(Vec3::new(4.0, 0.0, 0.0), 5.0),
                planet(Vec3::new(1.0, 0.0, 0.0), 5.0),
            ],
            vec![],
        );
        let report = scan(&c, Vec3::ZERO, &CourseConfig::default());
        assert_eq!(report.crashed, Some(1));
    }

    #[test]
    fn last_planet_in_range_gets_the_message() {
        let c = course(
            vec![
                planet(Vec3::new(8.0, 0.0, 0.0), 2.0),
                planet(Vec3::new(0.0, 9.0, 0.0), 2.0),
                planet(Vec3::new(0.0, 0.0, 40.0), 2.0),
            ],
            vec![],
        );
        let report = scan(&c, Vec3::ZERO, &CourseConfig::default());
        assert_eq!(report.crashed, None);
        assert_eq!(report.nearby_planet, Some(1));
    }

    #[test]
    fn crash_suppresses_ring_pickups() {
        let c = course(
            vec![planet(Vec3::new(3.0, 0.0, 0.0), 5.0)],
            vec![Ring::new(Vec3::ZERO, 0)],
        );
        let report = scan(&c, Vec3::ZERO, &CourseConfig::default());
        assert_eq!(report.crashed, Some(0));
        assert!(report.rings.is_empty());
    }

    #[test]
    fn ring_center_is_a_pickup() {
        let ring = Ring::new(Vec3::new(0.0, 0.0, -60.0), 0);
        let center = ring.position;
        let c = course(vec![], vec![ring]);
        let report = scan(&c, center, &CourseConfig::default());
        assert_eq!(report.rings, vec![0]);
    }

    #[test]
    fn outside_ring_disk_is_no_pickup() {
        let ring = Ring::new(Vec3::new(0.0, 0.0, -60.0), 0);
        let c = course(vec![], vec![ring]);
        let config = CourseConfig::default();
        // In the plane but past the opening.
        let report = scan(&c, Vec3::new(9.0, 0.0, -60.0), &config);
        assert!(report.rings.is_empty());
        // Within the opening but too far from the plane.
        let report = scan(&c, Vec3::new(0.0, 0.0, -57.5), &config);
        assert!(report.rings.is_empty());
        // Near the rim, close to the plane.
        let report = scan(&c, Vec3::new(7.0, 0.0, -61.0), &config);
        assert_eq!(report.rings, vec![0]);
    }

    #[test]
    fn collected_rings_are_skipped() {
        let mut ring = Ring::new(Vec3::new(0.0, 0.0, -60.0), 0);
        ring.collect();
        let center = ring.position;
        let c = course(vec![], vec![ring]);
        let report = scan(&c, center, &CourseConfig::default());
        assert!(report.rings.is_empty());
    }
}
