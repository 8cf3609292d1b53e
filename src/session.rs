//! Editing surface for a single day's attendance. One session owns one
//! working set; nothing here touches persistence except [`DailySession::save`].

use chrono::NaiveDate;

use crate::errors::StoreError;
use crate::model::attendance::{AttendanceStatus, DailyRecord, DayStatus};
use crate::model::employee::Employee;
use crate::store::AttendanceStore;

pub struct DailySession<'a> {
    store: &'a dyn AttendanceStore,
    roster: Vec<Employee>,
    date: NaiveDate,
    working: DailyRecord,
}

impl<'a> DailySession<'a> {
    /// Fetches the persisted record for `date` (empty if the date was never
    /// saved) and establishes it as the working set.
    pub async fn open(
        store: &'a dyn AttendanceStore,
        roster: Vec<Employee>,
        date: NaiveDate,
    ) -> Result<DailySession<'a>, StoreError> {
        let working = store.get_by_date(date).await?;
        Ok(Self {
            store,
            roster,
            date,
            working,
        })
    }

    /// Switches the session to another date. Unsaved edits for the previous
    /// date are discarded; the last load wins.
    pub async fn load(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        self.working = self.store.get_by_date(date).await?;
        self.date = date;
        Ok(())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn roster(&self) -> &[Employee] {
        &self.roster
    }

    /// Live tri-state view: an employee nobody has marked yet reads as
    /// `Unmarked`, not `Absent`.
    pub fn status_of(&self, employee_id: u64) -> DayStatus {
        DayStatus::from(self.working.get(&employee_id).copied())
    }

    /// Local mutation only; the latest status per employee wins.
    pub fn set_status(&mut self, employee_id: u64, status: AttendanceStatus) {
        self.working.insert(employee_id, status);
    }

    pub fn mark_all_present(&mut self) {
        self.mark_all(AttendanceStatus::Present);
    }

    pub fn mark_all_absent(&mut self) {
        self.mark_all(AttendanceStatus::Absent);
    }

    fn mark_all(&mut self, status: AttendanceStatus) {
        let ids: Vec<u64> = self.roster.iter().map(|e| e.id).collect();
        for id in ids {
            self.set_status(id, status);
        }
    }

    pub fn working_set(&self) -> &DailyRecord {
        &self.working
    }

    /// Merge-writes the working set for the loaded date. Entries another
    /// session already persisted for this date are preserved by the store's
    /// merge semantics. On failure the working set is untouched, so the
    /// caller can retry the save as-is.
    pub async fn save(&self) -> Result<(), StoreError> {
        self.store.set_by_date(self.date, &self.working).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::store::memory::MemoryAttendanceStore;

    fn employee(id: u64, name: &str) -> Employee {
        let created = NaiveDateTime::parse_from_str("2024-01-01 09:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        Employee {
            id,
            employee_code: format!("EMP-{id:03}"),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            department: "Operations".to_string(),
            position: "Associate".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    fn roster() -> Vec<Employee> {
        vec![employee(1, "alice"), employee(2, "bob"), employee(3, "cara")]
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[actix_web::test]
    async fn opens_with_empty_working_set_for_unsaved_date() {
        let store = MemoryAttendanceStore::new();
        let session = DailySession::open(&store, roster(), date("2025-03-10"))
            .await
            .unwrap();

        assert!(session.working_set().is_empty());
        assert_eq!(session.status_of(1), DayStatus::Unmarked);
    }

    #[actix_web::test]
    async fn latest_status_per_employee_wins() {
        let store = MemoryAttendanceStore::new();
        let mut session = DailySession::open(&store, roster(), date("2025-03-10"))
            .await
            .unwrap();

        session.set_status(1, AttendanceStatus::Present);
        session.set_status(1, AttendanceStatus::Absent);
        session.set_status(1, AttendanceStatus::Present);

        assert_eq!(session.status_of(1), DayStatus::Present);
        assert_eq!(session.working_set().len(), 1);
    }

    #[actix_web::test]
    async fn mark_all_covers_the_roster_snapshot() {
        let store = MemoryAttendanceStore::new();
        let mut session = DailySession::open(&store, roster(), date("2025-03-10"))
            .await
            .unwrap();

        session.mark_all_present();
        assert_eq!(session.status_of(1), DayStatus::Present);
        assert_eq!(session.status_of(2), DayStatus::Present);
        assert_eq!(session.status_of(3), DayStatus::Present);

        session.mark_all_absent();
        assert_eq!(session.status_of(2), DayStatus::Absent);
        assert_eq!(session.working_set().len(), 3);

        // Nothing persisted until save.
        assert!(store.saved(date("2025-03-10")).is_none());
    }

    #[actix_web::test]
    async fn save_merges_with_entries_from_other_sessions() {
        let store = MemoryAttendanceStore::with_day(
            date("2025-03-10"),
            DailyRecord::from([(2, AttendanceStatus::Present)]),
        );

        // A second editor opened before employee 2 was marked.
        let mut session = DailySession::open(&store, vec![employee(1, "alice")], date("2025-03-10"))
            .await
            .unwrap();
        session.working.clear();
        session.set_status(1, AttendanceStatus::Absent);
        session.save().await.unwrap();

        let saved = store.saved(date("2025-03-10")).unwrap();
        assert_eq!(saved.get(&1), Some(&AttendanceStatus::Absent));
        assert_eq!(saved.get(&2), Some(&AttendanceStatus::Present));
    }

    #[actix_web::test]
    async fn switching_dates_discards_unsaved_edits() {
        let store = MemoryAttendanceStore::with_day(
            date("2025-03-11"),
            DailyRecord::from([(1, AttendanceStatus::Present)]),
        );
        let mut session = DailySession::open(&store, roster(), date("2025-03-10"))
            .await
            .unwrap();

        session.set_status(2, AttendanceStatus::Present);
        session.load(date("2025-03-11")).await.unwrap();

        assert_eq!(session.date(), date("2025-03-11"));
        assert_eq!(session.status_of(1), DayStatus::Present);
        assert_eq!(session.status_of(2), DayStatus::Unmarked);
    }

    #[actix_web::test]
    async fn failed_save_preserves_the_working_set() {
        let store = MemoryAttendanceStore::new();
        let mut session = DailySession::open(&store, roster(), date("2025-03-10"))
            .await
            .unwrap();
        session.set_status(1, AttendanceStatus::Present);

        store.set_fail_writes(true);
        assert!(session.save().await.is_err());
        assert_eq!(session.status_of(1), DayStatus::Present);
        assert!(store.saved(date("2025-03-10")).is_none());

        store.set_fail_writes(false);
        session.save().await.unwrap();
        assert_eq!(
            store.saved(date("2025-03-10")).unwrap().get(&1),
            Some(&AttendanceStatus::Present)
        );
    }
}
