use crate::config::Duty;
use crate::state::Student;

/// One duty staffed for a week. Pairs always hold exactly two students,
/// in rotated roster order.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub duty: &'static Duty,
    pub pair: [Student; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekRoster {
    pub assignments: Vec<Assignment>,
    /// Students without a duty this week, in rotated order. The first
    /// two are next week's Tafel pair by construction of the rotation.
    pub pause_group: Vec<Student>,
}

/// Computes the duty assignments for one week. Pure function of its
/// inputs: the rotation shifts the roster by two positions per week, so
/// every student cycles through every duty and every pause slot, and
/// past weeks can be recomputed at any time (the sick-log replacement
/// lookup depends on that).
pub fn roster_for_week(
    students: &[Student],
    duties: &'static [Duty],
    week_offset: i64,
) -> WeekRoster {
    let total = students.len();
    if total == 0 {
        return WeekRoster {
            assignments: Vec::new(),
            pause_group: Vec::new(),
        };
    }

    // rem_euclid: a truncating % would go negative for past weeks.
    // Reducing before doubling keeps the arithmetic overflow-free for
    // any i64 offset.
    let shift = (week_offset.rem_euclid(total as i64) * 2).rem_euclid(total as i64) as usize;
    let rotated: Vec<&Student> = (0..total).map(|i| &students[(i + shift) % total]).collect();

    let mut assignments = Vec::with_capacity(duties.len());
    let mut cursor = 0usize;
    for duty in duties {
        // Short rosters leave trailing duties unstaffed; that is not an
        // error, the display just shows the duty without a pair.
        if cursor + 1 < total {
            assignments.push(Assignment {
                duty,
                pair: [rotated[cursor].clone(), rotated[cursor + 1].clone()],
            });
            cursor += 2;
        }
    }

    let pause_group = rotated[cursor..].iter().map(|s| (*s).clone()).collect();

    WeekRoster {
        assignments,
        pause_group,
    }
}
