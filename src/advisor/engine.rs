//! Fixed-percentage budgeting heuristics applied to a user-supplied
//! income/expense breakdown. Pure arithmetic, no store access.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const ESSENTIAL_CATEGORIES: [&str; 6] = [
    "Housing",
    "Food & Dining",
    "Transportation",
    "Utilities",
    "Healthcare",
    "Insurance",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub name: String,
    pub amount: f64,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub monthly_income: f64,
    pub expenses: Vec<ExpenseItem>,
}

#[derive(Debug, Serialize)]
pub struct Breakdown {
    pub essential: Vec<ExpenseItem>,
    pub discretionary: Vec<ExpenseItem>,
    pub savings: f64,
}

#[derive(Debug, Serialize)]
pub struct Advice {
    pub essential_percentage: f64,
    pub discretionary_percentage: f64,
    pub savings_percentage: f64,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
    pub breakdown: Breakdown,
}

fn is_essential(category: &str) -> bool {
    ESSENTIAL_CATEGORIES.contains(&category)
}

pub fn analyze(req: AnalyzeRequest) -> Result<Advice, ApiError> {
    if req.monthly_income <= 0.0 {
        return Err(ApiError::Validation(
            "Monthly income must be greater than zero.".into(),
        ));
    }
    if req.expenses.is_empty() {
        return Err(ApiError::Validation(
            "At least one expense is required.".into(),
        ));
    }

    let income = req.monthly_income;
    let total_expenses: f64 = req.expenses.iter().map(|e| e.amount).sum();

    let (essential, discretionary): (Vec<ExpenseItem>, Vec<ExpenseItem>) = req
        .expenses
        .into_iter()
        .partition(|e| is_essential(&e.category));

    let essential_total: f64 = essential.iter().map(|e| e.amount).sum();
    let discretionary_total: f64 = discretionary.iter().map(|e| e.amount).sum();

    let essential_percentage = essential_total / income * 100.0;
    let discretionary_percentage = discretionary_total / income * 100.0;
    let savings_percentage = 100.0 - essential_percentage - discretionary_percentage;

    let mut recommendations = Vec::new();
    let mut warnings = Vec::new();

    // Housing should be 25-30% of income.
    if let Some(housing) = essential.iter().find(|e| e.category == "Housing") {
        let housing_percentage = housing.amount / income * 100.0;
        if housing_percentage > 30.0 {
            warnings.push(format!(
                "Housing costs ({housing_percentage:.1}%) are above the recommended 30% threshold. \
                 Consider finding more affordable housing or getting a roommate."
            ));
        } else if housing_percentage < 25.0 {
            recommendations.push(format!(
                "Great job keeping housing costs low at {housing_percentage:.1}%! \
                 This gives you more flexibility for other expenses."
            ));
        }
    }

    // Essentials should be 50-60% of income.
    if essential_percentage > 60.0 {
        warnings.push(format!(
            "Essential expenses ({essential_percentage:.1}%) are consuming too much of your \
             income. Look for ways to reduce basic costs."
        ));
    } else if essential_percentage < 50.0 {
        recommendations.push(format!(
            "Excellent! Essential expenses are only {essential_percentage:.1}% of your income, \
             giving you room for savings and discretionary spending."
        ));
    }

    // Discretionary should be 20-30% of income.
    if discretionary_percentage > 30.0 {
        warnings.push(format!(
            "Discretionary spending ({discretionary_percentage:.1}%) is high. Consider reducing \
             non-essential expenses to increase savings."
        ));
    }

    // Savings rate should be 20% or more.
    if savings_percentage < 20.0 {
        warnings.push(format!(
            "Savings rate ({savings_percentage:.1}%) is below the recommended 20%. Try to \
             increase your savings for emergencies and future goals."
        ));
    } else {
        recommendations.push(format!(
            "Outstanding savings rate of {savings_percentage:.1}%! You're building a strong \
             financial foundation."
        ));

        let emergency_fund_target = total_expenses * 6.0;
        let monthly_savings = income * (savings_percentage / 100.0);
        let months = (emergency_fund_target / monthly_savings).ceil() as i64;
        recommendations.push(format!(
            "With your current savings rate, you could build a 6-month emergency fund in about \
             {months} months."
        ));
    }

    if let Some(debt) = discretionary.iter().find(|e| e.category == "Debt Payments") {
        let debt_percentage = debt.amount / income * 100.0;
        if debt_percentage > 20.0 {
            warnings.push(format!(
                "Debt payments ({debt_percentage:.1}%) are high. Focus on paying down \
                 high-interest debt first."
            ));
        }
    }

    if recommendations.is_empty() {
        recommendations.push("Your budget looks well-balanced! Keep up the good work.".into());
    }

    Ok(Advice {
        essential_percentage,
        discretionary_percentage,
        savings_percentage,
        recommendations,
        warnings,
        breakdown: Breakdown {
            essential,
            discretionary,
            savings: income - total_expenses,
        },
    })
}
