//! Input checks applied before any request reaches the database.

use crate::schemas::{NewComment, NewExpense, NewFriend, NewUser};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} must be a positive integer, got '{value}'")]
    NotAnId { field: &'static str, value: String },

    #[error("{field} must be a finite amount")]
    InvalidAmount { field: &'static str },

    #[error("a user cannot lend money to themselves")]
    SelfTransaction,

    #[error("a user cannot add themselves as a friend")]
    SelfFriendship,

    #[error("malformed request: {0}")]
    Malformed(String),
}

/// Parse an id taken from the request path.
pub fn parse_id(field: &'static str, raw: &str) -> Result<i32, ValidationError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::NotAnId {
            field,
            value: raw.to_owned(),
        }),
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Any finite amount; negative lines are refunds.
fn require_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidAmount { field });
    }
    Ok(())
}

fn require_id(field: &'static str, value: i32) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotAnId {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Presence checks for a request body.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)
    }
}

impl Validate for NewFriend {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("email", &self.email)
    }
}

impl Validate for NewExpense {
    fn validate(&self) -> Result<(), ValidationError> {
        require_id("userId", self.user_id)?;
        require_text("description", &self.description)?;
        require_amount("totalBalance", self.total_balance)?;
        for item in &self.transactions {
            require_id("lenderId", item.lender_id)?;
            require_id("borrowerId", item.borrower_id)?;
            require_amount("balance", item.balance)?;
            if item.lender_id == item.borrower_id {
                return Err(ValidationError::SelfTransaction);
            }
        }
        Ok(())
    }
}

impl Validate for NewComment {
    fn validate(&self) -> Result<(), ValidationError> {
        require_id("userId", self.user_id)?;
        require_text("comment", &self.comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::NewTransaction;
    use chrono::NaiveDate;

    fn expense(transactions: Vec<NewTransaction>) -> NewExpense {
        NewExpense {
            user_id: 1,
            description: "Groceries".into(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            total_balance: 40.0,
            notes: None,
            transactions,
        }
    }

    fn item(lender_id: i32, borrower_id: i32, balance: f64) -> NewTransaction {
        NewTransaction {
            lender_id,
            borrower_id,
            balance,
        }
    }

    #[test]
    fn parse_id_accepts_positive_integers() {
        assert_eq!(parse_id("userId", "42"), Ok(42));
        assert_eq!(parse_id("userId", " 7 "), Ok(7));
    }

    #[test]
    fn parse_id_rejects_garbage() {
        for raw in ["abc", "", "0", "-3", "1.5", "99999999999"] {
            assert_eq!(
                parse_id("userId", raw),
                Err(ValidationError::NotAnId {
                    field: "userId",
                    value: raw.into()
                }),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn user_needs_name_and_email() {
        let blank_name = NewUser {
            name: "  ".into(),
            email: "a@x.com".into(),
        };
        assert_eq!(blank_name.validate(), Err(ValidationError::Empty { field: "name" }));

        let ok = NewUser {
            name: "A".into(),
            email: "a@x.com".into(),
        };
        assert_eq!(ok.validate(), Ok(()));
    }

    #[test]
    fn email_format_is_not_checked() {
        let user = NewUser {
            name: "Bob".into(),
            email: "bob".into(),
        };
        assert_eq!(user.validate(), Ok(()));
        assert_eq!(NewFriend { email: "bob".into() }.validate(), Ok(()));
    }

    #[test]
    fn friend_email_must_be_present() {
        let friend = NewFriend { email: "".into() };
        assert_eq!(friend.validate(), Err(ValidationError::Empty { field: "email" }));
    }

    #[test]
    fn expense_may_have_no_transactions() {
        assert_eq!(expense(vec![]).validate(), Ok(()));
        assert_eq!(
            expense(vec![item(1, 2, 20.0), item(1, 3, 20.0)]).validate(),
            Ok(())
        );
    }

    #[test]
    fn expense_rejects_self_transactions() {
        assert_eq!(
            expense(vec![item(1, 2, 20.0), item(3, 3, 20.0)]).validate(),
            Err(ValidationError::SelfTransaction)
        );
    }

    #[test]
    fn negative_amounts_are_refunds() {
        let mut refund = expense(vec![item(1, 2, -2.5)]);
        refund.total_balance = -5.0;
        assert_eq!(refund.validate(), Ok(()));
    }

    #[test]
    fn expense_rejects_non_finite_amounts() {
        assert_eq!(
            expense(vec![item(1, 2, f64::INFINITY)]).validate(),
            Err(ValidationError::InvalidAmount { field: "balance" })
        );
        let mut nan_total = expense(vec![item(1, 2, 1.0)]);
        nan_total.total_balance = f64::NAN;
        assert_eq!(
            nan_total.validate(),
            Err(ValidationError::InvalidAmount {
                field: "totalBalance"
            })
        );
    }

    #[test]
    fn comment_needs_text() {
        let comment = NewComment {
            user_id: 1,
            comment: "\n".into(),
        };
        assert_eq!(comment.validate(), Err(ValidationError::Empty { field: "comment" }));
    }

    #[test]
    fn error_display() {
        let err = ValidationError::NotAnId {
            field: "expenseId",
            value: "x".into(),
        };
        assert_eq!(err.to_string(), "expenseId must be a positive integer, got 'x'");
    }
}
