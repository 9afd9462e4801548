//! Relationship model - In-memory adjacency for the three associations.
//!
//! Entities are addressed by id only. Each structure keeps both directions of its
//! association and updates them together, so a course's teacher set and a teacher's
//! course reference can never disagree. Nothing here performs I/O: the registry
//! services load the relevant edges from the store, apply one of these operations,
//! and persist the outcome inside the same transaction.

use std::collections::{BTreeMap, BTreeSet};

/// Teacher↔course assignments (one course, many teachers).
///
/// A teacher teaches at most one course. Once a teacher has a course, any further
/// assignment is refused, whether it names the same course or a different one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseStaff {
    course_of: BTreeMap<i64, i64>,
    teachers_of: BTreeMap<i64, BTreeSet<i64>>,
}

impl CourseStaff {
    /// Creates an empty staff table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from `(teacher_id, course_id)` rows as stored on teachers.
    ///
    /// Teachers without a course are skipped. Repeated rows for the same teacher keep
    /// the first course seen.
    pub fn from_assignments<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (i64, Option<i64>)>,
    {
        let mut staff = Self::new();
        for (teacher_id, course_id) in rows {
            if let Some(course_id) = course_id {
                staff.assign(course_id, teacher_id);
            }
        }
        staff
    }

    /// The course a teacher currently teaches.
    #[must_use]
    pub fn course_of(&self, teacher_id: i64) -> Option<i64> {
        self.course_of.get(&teacher_id).copied()
    }

    /// Teachers currently assigned to a course, in id order.
    #[cfg(test)]
    pub fn teachers_of(&self, course_id: i64) -> impl Iterator<Item = i64> + '_ {
        self.teachers_of
            .get(&course_id)
            .into_iter()
            .flat_map(|teachers| teachers.iter().copied())
    }

    /// True unless the teacher already teaches any course.
    #[must_use]
    pub fn can_assign(&self, teacher_id: i64) -> bool {
        !self.course_of.contains_key(&teacher_id)
    }

    /// Assigns `course_id` to `teacher_id` on both sides.
    ///
    /// Returns `false` and leaves the table untouched if the teacher already has a course.
    pub fn assign(&mut self, course_id: i64, teacher_id: i64) -> bool {
        if !self.can_assign(teacher_id) {
            return false;
        }
        self.course_of.insert(teacher_id, course_id);
        self.teachers_of
            .entry(course_id)
            .or_default()
            .insert(teacher_id);
        true
    }

    /// Removes the assignment only if the teacher currently teaches exactly `course_id`.
    pub fn remove(&mut self, course_id: i64, teacher_id: i64) -> bool {
        if self.course_of.get(&teacher_id) != Some(&course_id) {
            return false;
        }
        self.course_of.remove(&teacher_id);
        self.forget_teacher_in(course_id, teacher_id);
        true
    }

    /// Drops a course and returns the teachers that were released from it.
    pub fn detach_course(&mut self, course_id: i64) -> Vec<i64> {
        let released: Vec<i64> = self
            .teachers_of
            .remove(&course_id)
            .map(|teachers| teachers.into_iter().collect())
            .unwrap_or_default();
        for teacher_id in &released {
            self.course_of.remove(teacher_id);
        }
        released
    }

    /// Drops a teacher and returns the course it was released from, if any.
    pub fn detach_teacher(&mut self, teacher_id: i64) -> Option<i64> {
        let course_id = self.course_of.remove(&teacher_id)?;
        self.forget_teacher_in(course_id, teacher_id);
        Some(course_id)
    }

    /// Checks that both directions describe the same set of edges.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let forward = self
            .course_of
            .iter()
            .all(|(teacher, course)| {
                self.teachers_of
                    .get(course)
                    .is_some_and(|t| t.contains(teacher))
            });
        let backward = self.teachers_of.iter().all(|(course, teachers)| {
            !teachers.is_empty()
                && teachers
                    .iter()
                    .all(|teacher| self.course_of.get(teacher) == Some(course))
        });
        forward && backward
    }

    fn forget_teacher_in(&mut self, course_id: i64, teacher_id: i64) {
        if let Some(teachers) = self.teachers_of.get_mut(&course_id) {
            teachers.remove(&teacher_id);
            if teachers.is_empty() {
                self.teachers_of.remove(&course_id);
            }
        }
    }
}

/// A many-to-many association between "left" ids and "right" ids.
///
/// The registry uses students as the left side for both student↔course enrolments and
/// student↔teacher links. Every pair appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    by_left: BTreeMap<i64, BTreeSet<i64>>,
    by_right: BTreeMap<i64, BTreeSet<i64>>,
}

impl Membership {
    /// Creates an empty association.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the association from stored `(left, right)` pairs. Duplicates collapse.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut membership = Self::new();
        for (left, right) in pairs {
            membership.assign(left, right);
        }
        membership
    }

    /// Whether the pair is currently linked.
    #[must_use]
    pub fn contains(&self, left: i64, right: i64) -> bool {
        self.by_left
            .get(&left)
            .is_some_and(|rights| rights.contains(&right))
    }

    /// True unless the pair is already linked.
    #[must_use]
    pub fn can_assign(&self, left: i64, right: i64) -> bool {
        !self.contains(left, right)
    }

    /// Links the pair on both sides. Returns `false` if it was already linked.
    pub fn assign(&mut self, left: i64, right: i64) -> bool {
        if !self.can_assign(left, right) {
            return false;
        }
        self.by_left.entry(left).or_default().insert(right);
        self.by_right.entry(right).or_default().insert(left);
        true
    }

    /// Unlinks the pair on both sides. Returns `false` if it was not linked.
    pub fn remove(&mut self, left: i64, right: i64) -> bool {
        if !self.contains(left, right) {
            return false;
        }
        Self::unlink(&mut self.by_left, left, right);
        Self::unlink(&mut self.by_right, right, left);
        true
    }

    /// Right-side ids linked to `left`, in id order.
    #[cfg(test)]
    pub fn rights_of(&self, left: i64) -> impl Iterator<Item = i64> + '_ {
        self.by_left
            .get(&left)
            .into_iter()
            .flat_map(|rights| rights.iter().copied())
    }

    /// Left-side ids linked to `right`, in id order.
    #[cfg(test)]
    pub fn lefts_of(&self, right: i64) -> impl Iterator<Item = i64> + '_ {
        self.by_right
            .get(&right)
            .into_iter()
            .flat_map(|lefts| lefts.iter().copied())
    }

    /// Removes every pair involving `left`, returning the removed pairs.
    pub fn detach_left(&mut self, left: i64) -> Vec<(i64, i64)> {
        let rights = self.by_left.remove(&left).unwrap_or_default();
        for right in &rights {
            Self::unlink(&mut self.by_right, *right, left);
        }
        rights.into_iter().map(|right| (left, right)).collect()
    }

    /// Removes every pair involving `right`, returning the removed pairs.
    pub fn detach_right(&mut self, right: i64) -> Vec<(i64, i64)> {
        let lefts = self.by_right.remove(&right).unwrap_or_default();
        for left in &lefts {
            Self::unlink(&mut self.by_left, *left, right);
        }
        lefts.into_iter().map(|left| (left, right)).collect()
    }

    /// Number of linked pairs.
    #[cfg(test)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_left.values().map(BTreeSet::len).sum()
    }

    /// Whether no pairs are linked.
    #[cfg(test)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_left.is_empty()
    }

    /// Checks that both directions describe the same set of pairs.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let pairs_left: usize = self.by_left.values().map(BTreeSet::len).sum();
        let pairs_right: usize = self.by_right.values().map(BTreeSet::len).sum();
        pairs_left == pairs_right
            && self.by_left.iter().all(|(left, rights)| {
                rights.iter().all(|right| {
                    self.by_right
                        .get(right)
                        .is_some_and(|lefts| lefts.contains(left))
                })
            })
    }

    fn unlink(index: &mut BTreeMap<i64, BTreeSet<i64>>, key: i64, value: i64) {
        if let Some(values) = index.get_mut(&key) {
            values.remove(&value);
            if values.is_empty() {
                index.remove(&key);
            }
        }
    }
}
