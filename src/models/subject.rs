//! Subjects and the indexed subject catalog.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{ClassroomId, DepartmentId, SubjectId};

/// How a subject is taught.
///
/// Practical subjects occupy a practical pair (two adjacent hours); theory
/// subjects occupy a single atomic slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassType {
    Theory,
    Practical,
    Seminar,
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Theory => "theory",
            Self::Practical => "practical",
            Self::Seminar => "seminar",
        })
    }
}

/// A subject offered by a department.
///
/// `class_type` is optional because records may arrive without one; such
/// subjects are never scheduled and are penalized if they appear in a
/// candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    /// Unique subject code.
    pub code: String,
    /// Owning department.
    pub department: DepartmentId,
    /// Weekly teaching hours required.
    pub hours_per_week: u32,
    #[serde(default)]
    pub class_type: Option<ClassType>,
    /// Fixed classroom (required for practical subjects).
    #[serde(default)]
    pub assigned_classroom: Option<ClassroomId>,
}

impl Subject {
    /// Creates a theory subject with one weekly hour.
    pub fn new(
        id: SubjectId,
        name: impl Into<String>,
        code: impl Into<String>,
        department: DepartmentId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
            department,
            hours_per_week: 1,
            class_type: Some(ClassType::Theory),
            assigned_classroom: None,
        }
    }

    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours_per_week = hours;
        self
    }

    pub fn with_class_type(mut self, class_type: ClassType) -> Self {
        self.class_type = Some(class_type);
        self
    }

    /// Clears the class type.
    pub fn without_class_type(mut self) -> Self {
        self.class_type = None;
        self
    }

    pub fn with_classroom(mut self, classroom: ClassroomId) -> Self {
        self.assigned_classroom = Some(classroom);
        self
    }

    #[inline]
    pub fn is_practical(&self) -> bool {
        self.class_type == Some(ClassType::Practical)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Indexed, partitioned view over the subject list.
///
/// Built once per run. The partitions keep catalog order, so uniform
/// draws over them are reproducible under a fixed seed.
#[derive(Debug, Clone, Default)]
pub struct SubjectCatalog {
    subjects: Vec<Subject>,
    index: HashMap<SubjectId, usize>,
    valid: Vec<SubjectId>,
    practical: Vec<SubjectId>,
    theory: Vec<SubjectId>,
}

impl SubjectCatalog {
    /// Builds the catalog. On duplicate ids the first record wins.
    pub fn new(subjects: Vec<Subject>) -> Self {
        let mut index = HashMap::with_capacity(subjects.len());
        let mut valid = Vec::new();
        let mut practical = Vec::new();
        let mut theory = Vec::new();

        for (pos, s) in subjects.iter().enumerate() {
            if index.contains_key(&s.id) {
                continue;
            }
            index.insert(s.id, pos);
            match s.class_type {
                Some(ClassType::Practical) => {
                    valid.push(s.id);
                    practical.push(s.id);
                }
                Some(ClassType::Theory) => {
                    valid.push(s.id);
                    theory.push(s.id);
                }
                Some(ClassType::Seminar) => valid.push(s.id),
                None => {}
            }
        }

        Self {
            subjects,
            index,
            valid,
            practical,
            theory,
        }
    }

    /// Looks up a subject by id.
    pub fn get(&self, id: SubjectId) -> Option<&Subject> {
        self.index.get(&id).map(|&pos| &self.subjects[pos])
    }

    /// Class type of a subject, if the subject exists and has one.
    pub fn class_type_of(&self, id: SubjectId) -> Option<ClassType> {
        self.get(id).and_then(|s| s.class_type)
    }

    /// Subjects carrying a class type, in catalog order.
    pub fn valid(&self) -> &[SubjectId] {
        &self.valid
    }

    /// Practical subjects.
    pub fn practical(&self) -> &[SubjectId] {
        &self.practical
    }

    /// Theory subjects (seminars excluded).
    pub fn theory(&self) -> &[SubjectId] {
        &self.theory
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }
}
