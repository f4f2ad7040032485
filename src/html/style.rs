pub const STYLE: &str = r#"
body {
    margin: 0;
    font-family: "Source Sans Pro", ui-sans-serif, system-ui, sans-serif;
    background: #fafafa;
    color: #262730;
}

.layout {
    display: grid;
    grid-template-columns: 2fr 1fr;
    gap: 2rem;
    max-width: 1200px;
    margin: 0 auto;
    padding: 2rem;
}

.main-title {
    font-size: 3.5rem;
    font-weight: 800;
    text-align: center;
    margin-bottom: 1rem;
    background: linear-gradient(45deg, #FF6B6B, #4ECDC4, #45B7D1, #96CEB4);
    text-shadow: 2px 2px 4px rgba(0,0,0,0.1);
    border-radius: 15px;
    padding: 1rem;
}

.subtitle {
    text-align: center;
    font-size: 1.2rem;
    color: #666;
    margin-bottom: 3rem;
}

.uploaded-img {
    border-radius: 15px;
    box-shadow: 0 4px 15px rgba(0,0,0,0.2);
    width: 180px;
    max-width: 100%;
    height: auto;
}

.analyze-button {
    background: linear-gradient(45deg, #FF6B6B, #ee5a24);
    color: white;
    border: none;
    padding: 0.75rem 2rem;
    font-size: 1.1rem;
    border-radius: 50px;
    transition: all 0.3s ease;
    width: 100%;
    cursor: pointer;
    margin-top: 1rem;
}
.analyze-button:hover {
    transform: translateY(-2px);
    box-shadow: 0 5px 15px rgba(255,107,107,0.4);
}

.category-badge {
    display: inline-block;
    padding: 0.5rem 1.5rem;
    border-radius: 25px;
    font-weight: bold;
    font-size: 1rem;
    margin: 0.5rem 0;
}
.fruit-badge {
    background: #FF6B6B;
    color: white;
}
.vegetable-badge {
    background: #4ECDC4;
    color: white;
}

.prediction-text {
    font-size: 2rem;
    font-weight: bold;
    text-align: center;
    margin: 1rem 0;
}

.result-card {
    padding: 2rem;
    border-radius: 15px;
    box-shadow: 0 5px 15px rgba(0,0,0,0.1);
    margin: 1rem 0;
    border-left: 5px solid;
    transition: transform 0.3s ease;
}
.result-card:hover {
    transform: translateY(-5px);
}
.fruit-card {
    border-left-color: #FF6B6B;
    background: linear-gradient(135deg, #fff5f5, #ffffff);
}
.vegetable-card {
    border-left-color: #4ECDC4;
    background: linear-gradient(135deg, #f0fff4, #ffffff);
}

.calorie-card {
    background: linear-gradient(135deg, #ffeaa7, #ffffff);
    border-left: 5px solid #fdcb6e;
    padding: 1.5rem;
    border-radius: 15px;
    margin: 1rem 0;
    box-shadow: 0 5px 15px rgba(0,0,0,0.1);
}

.error-banner {
    background: #ffe3e3;
    color: #8b0000;
    border-left: 5px solid #ff4b4b;
    padding: 1rem 1.5rem;
    border-radius: 10px;
    margin: 1rem 0;
}

.info-panel {
    background: linear-gradient(135deg, #667eea, #764ba2);
    padding: 2rem;
    border-radius: 20px;
    box-shadow: 0 8px 20px rgba(0,0,0,0.15);
    margin-bottom: 2rem;
    color: #fff;
}
.info-panel h4 {
    color: #fffacd;
}

.supported-grid {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 15px;
    margin-top: 10px;
}
.supported-items {
    background: rgba(255,255,255,0.85);
    color: #262730;
    padding: 1rem;
    border-radius: 15px;
    box-shadow: 0 4px 10px rgba(0,0,0,0.1);
    transition: all 0.3s ease;
}
.supported-items:hover {
    transform: translateY(-5px);
    box-shadow: 0 10px 25px rgba(0,0,0,0.15);
}

@media (max-width: 768px) {
    .layout { grid-template-columns: 1fr; }
    .main-title { font-size: 2.5rem; }
    .prediction-text { font-size: 1.5rem; }
    .uploaded-img { width: 140px; }
}
"#;
