//! Party ledger usage example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use party_ledger::utils::MemoryStorage;
use party_ledger::{NewExpense, PartyLedger, ShareSplit, Split};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("🎉 Party Ledger - Weekend Trip Example\n");

    let storage = MemoryStorage::new();
    let mut ledger = PartyLedger::new(storage);

    // 1. Create the party and its roster
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).ok_or("invalid date")?;
    let party = ledger.create_party("Weekend trip".to_string(), date).await?;

    let alice = ledger.add_member(&party.id, "Alice").await?;
    let bob = ledger.add_member(&party.id, "Bob").await?;
    let carol = ledger.add_member(&party.id, "Carol").await?;
    println!("👥 Members: {}, {}, {}\n", alice.name, bob.name, carol.name);

    // 2. Some tasks
    ledger
        .add_task(&party.id, "Book the cabin", Some(alice.id.clone()), Some(date))
        .await?;
    let snacks = ledger
        .add_task(&party.id, "Buy snacks", Some(bob.id.clone()), None)
        .await?;
    ledger.toggle_task(&party.id, &snacks.id).await?;

    // 3. Expenses
    let everyone = vec![alice.id.clone(), bob.id.clone(), carol.id.clone()];

    ledger
        .add_expense(
            &party.id,
            NewExpense {
                description: "Cabin".to_string(),
                amount: BigDecimal::from(300),
                paid_by: alice.id.clone(),
                date,
                split: Split::Equal(everyone.clone()),
            },
        )
        .await?;
    println!("  ✓ Recorded: Cabin ₹300 paid by Alice, split equally");

    ledger
        .add_expense(
            &party.id,
            NewExpense {
                description: "Groceries".to_string(),
                amount: BigDecimal::from(90),
                paid_by: carol.id.clone(),
                date,
                split: Split::ByShares(vec![
                    ShareSplit {
                        member_id: alice.id.clone(),
                        shares: 1,
                    },
                    ShareSplit {
                        member_id: bob.id.clone(),
                        shares: 2,
                    },
                    ShareSplit {
                        member_id: carol.id.clone(),
                        shares: 3,
                    },
                ]),
            },
        )
        .await?;
    println!("  ✓ Recorded: Groceries ₹90 paid by Carol, split 1:2:3\n");

    // 4. Balances and settlement
    let summary = ledger.balance_summary(&party.id).await?;

    println!("📊 Balances:");
    for balance in &summary.balances {
        println!(
            "  {:<8} {}",
            balance.name,
            ledger.config().format_amount(&balance.amount)
        );
    }

    println!("\n💸 Who owes whom:");
    println!("{}", summary);

    let stored = ledger.get_party_required(&party.id).await?;
    println!("\n📦 Stored party:\n{}", serde_json::to_string_pretty(&stored)?);

    Ok(())
}
