// storage/src/registry.rs

use std::path::Path;

use chrono::Utc;
use sled::{Batch, Db, Tree};

use models::errors::SiteResult;
use models::registry::{Application, ApplicationRow, ApplicationStatus, Student};

/// Hard cap on the application listing, newest first.
const LIST_LIMIT: usize = 200;

/// The intake service's registry: students keyed by LRN, applications keyed
/// by a monotonic id. Values are JSON, like everything else in the store.
pub struct RegistryStore {
    db: Db,
    students: Tree,
    applications: Tree,
}

impl RegistryStore {
    pub fn new(db: Db) -> SiteResult<Self> {
        let students = db.open_tree("students")?;
        let applications = db.open_tree("applications")?;
        Ok(Self {
            db,
            students,
            applications,
        })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> SiteResult<Self> {
        Self::new(sled::open(path)?)
    }

    /// Inserts or updates the student with this LRN. Contact fields are
    /// replaced on every submission; the id is assigned on first sight and
    /// kept thereafter.
    pub fn upsert_student(
        &self,
        lrn: &str,
        full_name: &str,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> SiteResult<Student> {
        let id = match self.student(lrn)? {
            Some(existing) => existing.id,
            None => self.db.generate_id()?,
        };
        let student = Student {
            id,
            lrn: lrn.to_string(),
            full_name: full_name.to_string(),
            email,
            phone,
            address,
        };
        let encoded = serde_json::to_vec(&student)?;
        let mut batch = Batch::default();
        batch.insert(lrn, encoded.as_slice());
        self.students.apply_batch(batch)?;
        Ok(student)
    }

    pub fn student(&self, lrn: &str) -> SiteResult<Option<Student>> {
        match self.students.get(lrn)? {
            Some(ivec) => Ok(Some(serde_json::from_slice(&ivec)?)),
            None => Ok(None),
        }
    }

    /// Records a new application for `student_lrn` with status `submitted`
    /// and the current time, returning its id.
    pub fn insert_application(
        &self,
        student_lrn: &str,
        grade_level: &str,
        strand: Option<String>,
    ) -> SiteResult<u64> {
        let id = self.db.generate_id()?;
        let application = Application {
            id,
            student_lrn: student_lrn.to_string(),
            grade_level: grade_level.to_string(),
            strand,
            status: ApplicationStatus::Submitted,
            submitted_at: Utc::now(),
        };
        let encoded = serde_json::to_vec(&application)?;
        let mut batch = Batch::default();
        batch.insert(id.to_be_bytes().to_vec(), encoded);
        self.applications.apply_batch(batch)?;
        Ok(id)
    }

    pub fn application(&self, id: u64) -> SiteResult<Option<Application>> {
        match self.applications.get(id.to_be_bytes())? {
            Some(ivec) => Ok(Some(serde_json::from_slice(&ivec)?)),
            None => Ok(None),
        }
    }

    /// Moves an application to `status`. Returns the updated record, or
    /// `None` when no application has this id.
    pub fn set_application_status(
        &self,
        id: u64,
        status: ApplicationStatus,
    ) -> SiteResult<Option<Application>> {
        let Some(mut application) = self.application(id)? else {
            return Ok(None);
        };
        application.status = status;
        let encoded = serde_json::to_vec(&application)?;
        let mut batch = Batch::default();
        batch.insert(id.to_be_bytes().to_vec(), encoded);
        self.applications.apply_batch(batch)?;
        Ok(Some(application))
    }

    /// The application listing, newest first, joined with each owning
    /// student, optionally restricted to one workflow state. Capped at 200
    /// rows.
    pub fn applications(&self, status: Option<ApplicationStatus>) -> SiteResult<Vec<ApplicationRow>> {
        let mut rows = Vec::new();
        // Keys are big-endian ids, so reverse iteration is newest first.
        for item in self.applications.iter().rev() {
            let (_key, value) = item?;
            let application: Application = serde_json::from_slice(&value)?;
            if let Some(want) = status {
                if application.status != want {
                    continue;
                }
            }
            let Some(student) = self.student(&application.student_lrn)? else {
                continue;
            };
            rows.push(ApplicationRow {
                id: application.id,
                lrn: student.lrn,
                full_name: student.full_name,
                grade_level: application.grade_level,
                strand: application.strand,
                status: application.status,
                submitted_at: application.submitted_at,
            });
            if rows.len() == LIST_LIMIT {
                break;
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_registry() -> (TempDir, RegistryStore) {
        let dir = TempDir::new().unwrap();
        let registry = RegistryStore::open(dir.path().join("registry")).unwrap();
        (dir, registry)
    }

    #[test]
    fn should_keep_student_id_across_upserts() {
        let (_dir, registry) = open_registry();
        let first = registry
            .upsert_student("1234", "Cruz Ana", None, None, None)
            .unwrap();
        let second = registry
            .upsert_student("1234", "Cruz Ana Maria", Some("ana@example.com".into()), None, None)
            .unwrap();
        assert_eq!(first.id, second.id);

        let stored = registry.student("1234").unwrap().unwrap();
        assert_eq!(stored.full_name, "Cruz Ana Maria");
        assert_eq!(stored.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn should_list_applications_newest_first() {
        let (_dir, registry) = open_registry();
        registry.upsert_student("1234", "Cruz Ana", None, None, None).unwrap();
        let first = registry.insert_application("1234", "Grade 11", None).unwrap();
        let second = registry.insert_application("1234", "Grade 12", None).unwrap();

        let rows = registry.applications(None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, second);
        assert_eq!(rows[1].id, first);
        assert_eq!(rows[0].full_name, "Cruz Ana");
    }

    #[test]
    fn should_filter_listing_by_status() {
        let (_dir, registry) = open_registry();
        registry.upsert_student("1234", "Cruz Ana", None, None, None).unwrap();
        let id = registry.insert_application("1234", "Grade 11", None).unwrap();
        registry.insert_application("1234", "Grade 12", None).unwrap();
        registry
            .set_application_status(id, ApplicationStatus::Approved)
            .unwrap()
            .unwrap();

        let approved = registry.applications(Some(ApplicationStatus::Approved)).unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, id);
    }

    #[test]
    fn should_cap_listing_at_limit() {
        let (_dir, registry) = open_registry();
        registry.upsert_student("1234", "Cruz Ana", None, None, None).unwrap();
        for _ in 0..LIST_LIMIT + 5 {
            registry.insert_application("1234", "Grade 11", None).unwrap();
        }
        let rows = registry.applications(None).unwrap();
        assert_eq!(rows.len(), LIST_LIMIT);
    }

    #[test]
    fn should_report_missing_application_on_status_update() {
        let (_dir, registry) = open_registry();
        let updated = registry
            .set_application_status(99, ApplicationStatus::Approved)
            .unwrap();
        assert!(updated.is_none());
    }
}
