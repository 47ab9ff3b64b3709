use rusqlite::{params, Connection};
use tracing::info;

/// Default disease reference rows:
/// (name, details, symptoms, treatable, medicines, hospitals, notes)
pub const DEFAULT_DISEASES: [(&str, &str, &str, bool, &str, &str, &str); 10] = [
    ("fever", "Temporary rise in body temperature", "fever,chills,headache", true, "Paracetamol, Ibuprofen", "", "Consult if >3 days"),
    ("diabetes", "Chronic high blood sugar", "thirst,urination,fatigue", false, "", "AIIMS Delhi, Apollo", "Long-term care"),
    ("hypertension", "High blood pressure", "headache,breathlessness", false, "", "Cardiology Centers", "Monitor regularly"),
    ("common cold", "Viral URTI", "sneezing,cough,sore throat", true, "Antihistamines, Decongestants", "", "Usually self-limited"),
    ("malaria", "Mosquito-borne parasitic infection", "fever,chills", true, "ACT, Chloroquine", "Infectious Disease Hospitals", "Diagnose with test"),
    ("asthma", "Chronic airway inflammation", "wheezing,shortness of breath", false, "Inhalers (Salbutamol)", "Pulmonology Centers", "Doctor plan needed"),
    ("covid-19", "Viral infection SARS-CoV-2", "fever,cough,loss of smell", false, "Supportive care", "COVID Hospitals", "Test and isolate"),
    ("dengue", "Mosquito-borne viral infection", "fever,joint pain,rash", false, "Supportive care (hydration)", "Dengue care units", "Avoid NSAIDs"),
    ("tuberculosis", "Bacterial lung infection", "cough,weight loss,fever", false, "DOTS therapy", "TB Centers", "Long supervised treatment"),
    ("migraine", "Neurological headaches", "throbbing headache,nausea", true, "Pain relievers, Triptans", "", "Avoid triggers"),
];

/// Default hospital rows: (name, city, contact)
pub const DEFAULT_HOSPITALS: [(&str, &str, &str); 4] = [
    ("AIIMS Delhi", "Delhi", "011-2658xxxx"),
    ("Apollo Hospitals", "Chennai", "044-2829xxxx"),
    ("Fortis", "New Delhi", "011-4706xxxx"),
    ("Max Healthcare", "New Delhi", "011-4150xxxx"),
];

/// Insert reference data into tables that are still empty
pub fn seed_reference_data(conn: &Connection) -> Result<(), String> {
    seed_hospitals(conn)?;
    seed_diseases(conn)?;
    Ok(())
}

fn table_is_empty(conn: &Connection, table: &str) -> Result<bool, String> {
    let count: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        .map_err(|e| e.to_string())?;
    Ok(count == 0)
}

fn seed_hospitals(conn: &Connection) -> Result<(), String> {
    if !table_is_empty(conn, "hospitals")? {
        return Ok(());
    }

    info!("Seeding {} default hospitals", DEFAULT_HOSPITALS.len());
    let mut stmt = conn
        .prepare("INSERT INTO hospitals (name, city, contact) VALUES (?1, ?2, ?3)")
        .map_err(|e| e.to_string())?;

    for (name, city, contact) in DEFAULT_HOSPITALS {
        stmt.execute(params![name, city, contact])
            .map_err(|e| format!("Failed to seed hospital {}: {}", name, e))?;
    }

    Ok(())
}

fn seed_diseases(conn: &Connection) -> Result<(), String> {
    if !table_is_empty(conn, "diseases")? {
        return Ok(());
    }

    info!("Seeding {} default diseases", DEFAULT_DISEASES.len());
    let mut stmt = conn
        .prepare(
            "INSERT INTO diseases (name, details, symptoms, treatable, medicines, hospitals, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(|e| e.to_string())?;

    for (name, details, symptoms, treatable, medicines, hospitals, notes) in DEFAULT_DISEASES {
        stmt.execute(params![name, details, symptoms, treatable, medicines, hospitals, notes])
            .map_err(|e| format!("Failed to seed disease {}: {}", name, e))?;
    }

    Ok(())
}
