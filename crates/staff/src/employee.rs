use serde::{Deserialize, Serialize};

use worktrack_core::{DomainResult, EmployeeId, Entity, NonNegative, RequiredText};

/// Working hours in a month; the divisor that turns a monthly salary into an hourly rate.
pub const HOURS_PER_MONTH: f64 = 176.0;

/// An employee with a monthly salary and accrued working hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    id: Option<EmployeeId>,
    name: RequiredText,
    position: String,
    salary: NonNegative,
    hours_worked: NonNegative,
}

impl Employee {
    /// Create a new, not-yet-persisted employee with zero hours worked.
    pub fn new(name: impl Into<String>, position: impl Into<String>, salary: f64) -> DomainResult<Self> {
        Ok(Self {
            id: None,
            name: RequiredText::parse("name", name)?,
            position: position.into(),
            salary: NonNegative::parse("salary", salary)?,
            hours_worked: NonNegative::ZERO,
        })
    }

    /// Rebuild a persisted employee from stored values.
    ///
    /// Values are validated the same way as on construction.
    pub fn restore(
        id: EmployeeId,
        name: impl Into<String>,
        position: impl Into<String>,
        salary: f64,
        hours_worked: f64,
    ) -> DomainResult<Self> {
        let mut employee = Self::new(name, position, salary)?;
        employee.hours_worked = NonNegative::parse("hours worked", hours_worked)?;
        employee.id = Some(id);
        Ok(employee)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn salary(&self) -> f64 {
        self.salary.get()
    }

    pub fn hours_worked(&self) -> f64 {
        self.hours_worked.get()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        self.name = RequiredText::parse("name", name)?;
        Ok(())
    }

    pub fn set_position(&mut self, position: impl Into<String>) {
        self.position = position.into();
    }

    pub fn set_salary(&mut self, salary: f64) -> DomainResult<()> {
        self.salary = NonNegative::parse("salary", salary)?;
        Ok(())
    }

    /// Accrue worked hours. Hours never decrease.
    pub fn add_hours(&mut self, hours: f64) -> DomainResult<()> {
        let hours = NonNegative::parse("hours", hours)?;
        self.hours_worked = self.hours_worked.checked_add("hours worked", hours)?;
        Ok(())
    }

    /// Pay owed for the accrued hours at the hourly rate `salary / HOURS_PER_MONTH`.
    pub fn calculate_pay(&self) -> f64 {
        // Multiply before dividing so whole-month multiples come out exact.
        self.hours_worked.get() * self.salary.get() / HOURS_PER_MONTH
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> Option<Self::Id> {
        self.id
    }

    fn assign_id(&mut self, id: Self::Id) {
        self.id = Some(id);
    }
}

impl core::fmt::Display for Employee {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.name, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worktrack_core::DomainError;

    fn developer() -> Employee {
        Employee::restore(EmployeeId::new(1), "Ivan Ivanov", "Developer", 100_000.0, 0.0).unwrap()
    }

    #[test]
    fn restore_exposes_every_attribute() {
        let employee = developer();
        assert_eq!(employee.id(), Some(EmployeeId::new(1)));
        assert_eq!(employee.name(), "Ivan Ivanov");
        assert_eq!(employee.position(), "Developer");
        assert_eq!(employee.salary(), 100_000.0);
        assert_eq!(employee.hours_worked(), 0.0);
    }

    #[test]
    fn new_employee_has_no_id_and_no_hours() {
        let employee = Employee::new("Anna", "", 50_000.0).unwrap();
        assert_eq!(employee.id(), None);
        assert!(!employee.is_persisted());
        assert_eq!(employee.hours_worked(), 0.0);
        assert_eq!(employee.position(), "");
    }

    #[test]
    fn construction_rejects_invalid_values() {
        assert!(Employee::new("", "Dev", 1.0).is_err());
        assert!(Employee::new("  ", "Dev", 1.0).is_err());
        assert!(Employee::new("Anna", "Dev", -1.0).is_err());
        assert!(Employee::restore(EmployeeId::new(1), "Anna", "Dev", 1.0, -3.0).is_err());
    }

    #[test]
    fn set_name_validates_before_assigning() {
        let mut employee = developer();
        employee.set_name("Petr Petrov").unwrap();
        assert_eq!(employee.name(), "Petr Petrov");

        assert!(matches!(employee.set_name(""), Err(DomainError::Validation(_))));
        assert!(employee.set_name("   ").is_err());
        assert_eq!(employee.name(), "Petr Petrov");
    }

    #[test]
    fn set_salary_rejects_negative_and_keeps_old_value() {
        let mut employee = developer();
        employee.set_salary(150_000.0).unwrap();
        assert_eq!(employee.salary(), 150_000.0);

        assert!(employee.set_salary(-1_000.0).is_err());
        assert_eq!(employee.salary(), 150_000.0);
    }

    #[test]
    fn add_hours_accumulates() {
        let mut employee = developer();
        employee.add_hours(8.0).unwrap();
        assert_eq!(employee.hours_worked(), 8.0);
        employee.add_hours(4.0).unwrap();
        assert_eq!(employee.hours_worked(), 12.0);
    }

    #[test]
    fn add_hours_rejects_negative() {
        let mut employee = developer();
        employee.add_hours(10.0).unwrap();
        assert!(employee.add_hours(-5.0).is_err());
        assert_eq!(employee.hours_worked(), 10.0);
    }

    #[test]
    fn pay_follows_a_full_month_and_a_half() {
        let mut employee = developer();
        assert_eq!(employee.calculate_pay(), 0.0);

        employee.add_hours(176.0).unwrap();
        assert_eq!(employee.calculate_pay(), 100_000.0);

        employee.add_hours(88.0).unwrap();
        assert_eq!(employee.hours_worked(), 264.0);
        assert_eq!(employee.calculate_pay(), 150_000.0);
    }

    #[test]
    fn display_shows_name_and_position() {
        assert_eq!(developer().to_string(), "Ivan Ivanov (Developer)");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: constructing and reading back returns the supplied values.
            #[test]
            fn construction_round_trips(
                name in "[A-Za-z][A-Za-z ]{0,30}",
                position in "[A-Za-z ]{0,20}",
                salary in 0.0f64..1_000_000.0,
            ) {
                let employee = Employee::new(name.clone(), position.clone(), salary).unwrap();
                prop_assert_eq!(employee.name(), name.as_str());
                prop_assert_eq!(employee.position(), position.as_str());
                prop_assert_eq!(employee.salary(), salary);
                prop_assert_eq!(employee.hours_worked(), 0.0);
            }

            /// Property: pay is linear in hours for a fixed salary.
            #[test]
            fn pay_is_linear_in_hours(
                salary in 0u32..1_000_000,
                hours in 0u32..1_000,
            ) {
                let mut single = Employee::new("A", "", f64::from(salary)).unwrap();
                single.add_hours(f64::from(hours)).unwrap();

                let mut double = Employee::new("A", "", f64::from(salary)).unwrap();
                double.add_hours(f64::from(hours) * 2.0).unwrap();

                prop_assert_eq!(double.calculate_pay(), 2.0 * single.calculate_pay());
            }
        }
    }
}
